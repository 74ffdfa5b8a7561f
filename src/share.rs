use crate::schemas::SettlementStep;

/// One `"X pays Y $n"` line per step, the context handed to whoever writes
/// the friendly share message.
pub fn plan_lines(steps: &[SettlementStep]) -> String {
    steps
        .iter()
        .map(|step| format!("{} pays {} ${}", step.from_name, step.to_name, step.amount))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text to copy for sharing: the generated message when there is one,
/// otherwise a bare list of transfers.
pub fn clipboard_text(steps: &[SettlementStep], message: Option<&str>) -> String {
    match message.map(str::trim) {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => steps
            .iter()
            .map(|step| format!("{} -> {}: ${}", step.from_name, step.to_name, step.amount))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
