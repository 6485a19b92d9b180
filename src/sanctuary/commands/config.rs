use super::{CmdMessage, CmdResult};
use crate::config::SanctuaryConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = SanctuaryConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = SanctuaryConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => result.add_message(CmdMessage::error(format!(
                    "Unknown config key: {}",
                    key
                ))),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = SanctuaryConfig::load(dir)?;
            config.set(&key, &value)?;
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::tempdir;

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = tempdir().unwrap();
        run(
            dir.path(),
            ConfigAction::Set("video-source".into(), "static".into()),
        )
        .unwrap();

        let result = run(dir.path(), ConfigAction::ShowKey("video-source".into())).unwrap();
        assert_eq!(result.messages[0].content, "static");

        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert!(result.config.is_some());
    }

    #[test]
    fn unknown_key_is_reported() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);

        assert!(run(dir.path(), ConfigAction::Set("colour".into(), "red".into())).is_err());
    }
}
