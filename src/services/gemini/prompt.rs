use crate::models::candle::AnalysisRequest;

const INSTRUCTIONS: &str = "You are a forex trading analyst. Study the candles below and reply with \
a single JSON object and nothing else, using exactly these keys: \
\"action\" (one of \"buy\", \"sell\", \"hold\"), \"entry\" (number or null), \
\"stopLoss\" (number or null), \"takeProfit\" (number or null), \
\"confidence\" (number between 0 and 1), \"rationale\" (short string).";

pub fn build_prompt(request: &AnalysisRequest) -> String {
    let candles = serde_json::to_string(&request.candles).unwrap_or_else(|_| "[]".to_string());
    format!(
        "{}\n\nSymbol: {}\nTimeframe: {}\nCandles ({} bars, oldest first):\n{}",
        INSTRUCTIONS,
        request.symbol,
        request.timeframe,
        request.candles.len(),
        candles
    )
}

/// Pull the model's JSON answer out of an optional Markdown code fence.
///
/// Prose before the opening fence and after the closing one is dropped, and
/// the language tag (`json`, `JSON`, ...) is skipped whatever its case.
pub fn extract_json_text(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };
    let mut rest = &trimmed[start + 3..];

    let tag_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    let after_tag = &rest[tag_len..];
    if tag_len > 0 && (after_tag.is_empty() || after_tag.starts_with(char::is_whitespace)) {
        rest = after_tag;
    }

    let end = rest.find("```").unwrap_or(rest.len());
    rest[..end].trim()
}
