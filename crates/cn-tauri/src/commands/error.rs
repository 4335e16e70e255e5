/// Centralized error mapping for commands.
///
/// Errors cross the IPC boundary as their full context chain.
pub fn map_err<E: Into<anyhow::Error>>(err: E) -> String {
    format!("{:#}", err.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn keeps_context_chain() {
        let err = Err::<(), _>(anyhow::anyhow!("disk full"))
            .context("save settings")
            .unwrap_err();
        assert_eq!(map_err(err), "save settings: disk full");
    }
}
