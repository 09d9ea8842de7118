use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use yahtzee_core::game::GameSnapshot;
use yahtzee_core::history::{GameRecord, History};
use yahtzee_core::settings::Settings;

const SETTINGS_FILE: &str = "settings.json";
const STATE_FILE: &str = "state.json";
const HISTORY_FILE: &str = "history.json";

/// JSON files kept in one data directory.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn load_settings(&self) -> anyhow::Result<Settings> {
        Ok(read_json(&self.dir.join(SETTINGS_FILE))
            .await?
            .unwrap_or_default())
    }

    pub async fn save_settings(&self, settings: &Settings) -> anyhow::Result<()> {
        write_json(&self.dir.join(SETTINGS_FILE), settings).await
    }

    pub async fn load_game(&self) -> anyhow::Result<Option<GameSnapshot>> {
        read_json(&self.dir.join(STATE_FILE)).await
    }

    pub async fn has_saved_game(&self) -> bool {
        tokio::fs::try_exists(self.dir.join(STATE_FILE))
            .await
            .unwrap_or(false)
    }

    pub async fn save_game(&self, snapshot: &GameSnapshot) -> anyhow::Result<()> {
        write_json(&self.dir.join(STATE_FILE), snapshot).await
    }

    pub async fn clear_game(&self) -> anyhow::Result<()> {
        match tokio::fs::remove_file(self.dir.join(STATE_FILE)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!("remove saved game: {}", e)),
        }
    }

    pub async fn load_history(&self) -> anyhow::Result<History> {
        Ok(read_json(&self.dir.join(HISTORY_FILE))
            .await?
            .unwrap_or_default())
    }

    pub async fn save_history(&self, history: &History) -> anyhow::Result<()> {
        write_json(&self.dir.join(HISTORY_FILE), history).await
    }

    pub async fn append_record(&self, record: GameRecord) -> anyhow::Result<()> {
        let mut history = self.load_history().await?;
        history.push(record);
        self.save_history(&history).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Option<T>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let value = serde_json::from_slice(&bytes)
                .map_err(|e| anyhow::anyhow!("parse {}: {}", path.display(), e))?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow::anyhow!("read {}: {}", path.display(), e)),
    }
}

// Written to a sibling file first so a crash never leaves half a document.
async fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use yahtzee_core::game::GameState;
    use yahtzee_core::player::ScoreSheet;
    use yahtzee_core::scoring::Category;
    use yahtzee_core::settings::DiceVelocity;

    fn temp_storage() -> Storage {
        Storage::new(std::env::temp_dir().join(format!("yahtzee-test-{}", uuid::Uuid::new_v4())))
    }

    #[tokio::test]
    async fn test_missing_files_give_defaults() {
        let storage = temp_storage();
        assert_eq!(storage.load_settings().await.unwrap(), Settings::default());
        assert!(storage.load_game().await.unwrap().is_none());
        assert!(storage.load_history().await.unwrap().is_empty());
        assert!(!storage.has_saved_game().await);
        storage.clear_game().await.unwrap();
    }

    #[tokio::test]
    async fn test_settings_persist() {
        let storage = temp_storage();
        let settings = Settings {
            dark_theme: true,
            dice_velocity: DiceVelocity::Fast,
            ..Settings::default()
        };
        storage.save_settings(&settings).await.unwrap();
        assert_eq!(storage.load_settings().await.unwrap(), settings);
        tokio::fs::remove_dir_all(storage.dir()).await.unwrap();
    }

    #[tokio::test]
    async fn test_game_save_load_clear() {
        let storage = temp_storage();
        let mut sheet = ScoreSheet::new();
        sheet.record(Category::Chance, 21).unwrap();
        let snapshot = GameSnapshot {
            dice: [2, 2, 5, 6, 6],
            rolls_used: 2,
            players: vec![sheet],
        };
        storage.save_game(&snapshot).await.unwrap();
        assert!(storage.has_saved_game().await);
        assert_eq!(storage.load_game().await.unwrap(), Some(snapshot));

        storage.clear_game().await.unwrap();
        assert!(storage.load_game().await.unwrap().is_none());
        tokio::fs::remove_dir_all(storage.dir()).await.unwrap();
    }

    #[tokio::test]
    async fn test_append_record() {
        let storage = temp_storage();
        let mut sheet = ScoreSheet::new();
        for cat in Category::ALL {
            let value = if cat == Category::Chance { 13 } else { 0 };
            sheet.record(cat, value).unwrap();
        }
        let snapshot = GameSnapshot {
            dice: [1, 1, 1, 1, 1],
            rolls_used: 0,
            players: vec![sheet],
        };
        let game = GameState::restore(snapshot, false).unwrap();
        let record = GameRecord::from_game(&game, Utc::now()).unwrap();

        storage.append_record(record.clone()).await.unwrap();
        storage.append_record(record).await.unwrap();
        let history = storage.load_history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.best_score(), Some(13));
        tokio::fs::remove_dir_all(storage.dir()).await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let storage = temp_storage();
        tokio::fs::create_dir_all(storage.dir()).await.unwrap();
        tokio::fs::write(storage.dir().join(STATE_FILE), b"{not json")
            .await
            .unwrap();
        assert!(storage.load_game().await.is_err());
        tokio::fs::remove_dir_all(storage.dir()).await.unwrap();
    }
}
