/// Centralized error mapping for commands.
///
/// Every command funnels its failures through here so the frontend always
/// receives the plain `Display` text.
pub fn map_err(err: anyhow::Error) -> String {
    err.to_string()
}
