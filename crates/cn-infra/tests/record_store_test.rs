//! Record Store Persistence Tests
//! 记录存储持久化测试

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use cn_core::clipboard::{ClipContent, ClipSample};
use cn_core::ports::{ClipRepositoryPort, TaskRepositoryPort};
use cn_core::reminder::{NewTask, RecurrenceSpec};
use cn_infra::RecordStore;

fn reminder(content: &str) -> cn_core::ReminderTask {
    NewTask {
        content: content.into(),
        title: Some("Standup".into()),
        trigger_at: Utc.with_ymd_and_hms(2024, 3, 4, 9, 30, 0).unwrap(),
        recurrence: Some(RecurrenceSpec::cron("30 9 * * 1-5").unwrap()),
        priority: Default::default(),
        category: Some("work".into()),
    }
    .into_task(Utc::now())
}

#[tokio::test]
async fn test_reopen_restores_clips_and_tasks() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let task = reminder("daily standup");
    {
        let store = RecordStore::open(&path).await.unwrap();
        store
            .append_clip(
                ClipSample::new(ClipContent::Text { text: "first".into() }, Utc::now()),
                10,
            )
            .await
            .unwrap();
        store
            .append_clip(
                ClipSample::new(ClipContent::Image { bytes: vec![0x89, b'P', b'N', b'G'] }, Utc::now()),
                10,
            )
            .await
            .unwrap();
        store.insert_task(task.clone()).await.unwrap();
    }

    let reopened = RecordStore::open(&path).await.unwrap();
    let clips = reopened.list_clips(None).await.unwrap();
    assert_eq!(clips.len(), 2);
    assert!(matches!(clips[0].content, ClipContent::Image { ref bytes } if bytes.len() == 4));
    assert_eq!(clips[1].preview(20), "first");

    let restored = reopened.get_task(&task.id).await.unwrap().unwrap();
    assert_eq!(restored, task);
}

#[tokio::test]
async fn test_deletes_are_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let task = reminder("to delete");
    {
        let store = RecordStore::open(&path).await.unwrap();
        store.insert_task(task.clone()).await.unwrap();
        store.delete_task(&task.id).await.unwrap();
    }

    let reopened = RecordStore::open(&path).await.unwrap();
    assert!(reopened.list_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let store = RecordStore::open(dir.path().join("nested").join("store.json"))
        .await
        .unwrap();

    assert!(store.list_clips(None).await.unwrap().is_empty());
    assert!(store.list_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupt_file_is_moved_aside() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let store = RecordStore::open(&path).await.unwrap();
    assert!(store.list_clips(None).await.unwrap().is_empty());
    assert!(dir.path().join("store.json.corrupt").exists());
    assert!(!path.exists());
}
