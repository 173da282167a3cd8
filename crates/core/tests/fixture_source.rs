use std::path::PathBuf;

use chrono::{DateTime, Utc};
use wonderland_core::{
    AREAS, CatalogSource, FixtureSource, LessonCriteria, MemoryStore, SortMode, area_counts,
    filter_lessons, partition_sessions, sort_lessons, summarize,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures")
}

fn fixed_now() -> DateTime<Utc> {
    "2026-10-18T00:00:00Z".parse().unwrap()
}

#[tokio::test]
async fn loads_every_collection() {
    let catalog = FixtureSource::new(fixtures_dir()).load().await.unwrap();
    assert_eq!(catalog.lessons.len(), 8);
    assert_eq!(catalog.sessions.len(), 4);
    assert_eq!(catalog.progress.len(), 4);
    assert_eq!(catalog.users.len(), 2);
    assert_eq!(catalog.wisdom.len(), 5);
}

#[tokio::test]
async fn derived_views_over_fixtures() {
    let catalog = FixtureSource::new(fixtures_dir()).load().await.unwrap();

    let mut practice = filter_lessons(
        &catalog.lessons,
        &LessonCriteria::new().with_category("Practice"),
    );
    sort_lessons(&mut practice, SortMode::PriceLow);
    assert_eq!(practice.iter().map(|l| l.id).collect::<Vec<_>>(), vec![6, 8]);

    let counts: Vec<(&str, usize)> = area_counts(&AREAS, &catalog.lessons)
        .into_iter()
        .map(|(area, n)| (area.id, n))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("inner-awareness", 2),
            ("transformation-path", 2),
            ("healing-gardens", 2),
            ("labyrinth-center", 6),
            ("wisdom-grove", 5),
        ]
    );

    let partition = partition_sessions(&catalog.sessions, fixed_now());
    assert_eq!(partition.past.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1]);
    assert_eq!(
        partition.upcoming.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![4, 2, 3]
    );

    let store = MemoryStore::new(catalog);
    let ctx = store.context_for(None, fixed_now()).unwrap();
    let summary = summarize(&store.user_progress(ctx.user_id()), &ctx.user);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.in_progress, 1);
    assert_eq!(summary.overall_percentage, 53);
    assert_eq!(summary.total_purchased, 3);
    assert_eq!(summary.total_watch_time, 185);
}

#[tokio::test]
async fn mutations_survive_a_save_and_reload() {
    let catalog = FixtureSource::new(fixtures_dir()).load().await.unwrap();
    let mut store = MemoryStore::new(catalog);
    let mut ctx = store.context_for(Some(2), fixed_now()).unwrap();

    store.purchase_lesson(&mut ctx, 6).unwrap();
    store.update_progress(&ctx, 6, 100).unwrap();
    store.add_bookmark(&ctx, 6, 42).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = FixtureSource::new(dir.path());
    target.save(store.catalog()).await.unwrap();

    let reloaded = MemoryStore::new(target.load().await.unwrap());
    assert!(reloaded.user(2).unwrap().has_purchased(6));
    let progress = reloaded.lesson_progress(2, 6).unwrap();
    assert_eq!(progress.completion_percentage.value(), 100);
    assert_eq!(progress.completed_at, Some(fixed_now()));
    assert_eq!(progress.bookmarks.as_slice(), &[42]);
    assert_eq!(reloaded.catalog().wisdom.len(), 5);
}

#[tokio::test]
async fn missing_wisdom_file_is_not_an_error() {
    let catalog = FixtureSource::new(fixtures_dir()).load().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let target = FixtureSource::new(dir.path());
    target.save(&catalog).await.unwrap();
    std::fs::remove_file(dir.path().join("wisdom.json")).unwrap();

    let reloaded = target.load().await.unwrap();
    assert!(reloaded.wisdom.is_empty());
    assert_eq!(reloaded.lessons.len(), catalog.lessons.len());
}

#[tokio::test]
async fn saving_over_a_directory_replaces_every_collection() {
    let catalog = FixtureSource::new(fixtures_dir()).load().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let target = FixtureSource::new(dir.path());
    target.save(&catalog).await.unwrap();

    let mut trimmed = catalog.clone();
    trimmed.wisdom.clear();
    trimmed.sessions.truncate(1);
    target.save(&trimmed).await.unwrap();

    let reloaded = target.load().await.unwrap();
    assert!(reloaded.wisdom.is_empty());
    assert_eq!(reloaded.sessions.len(), 1);
    assert_eq!(reloaded.lessons.len(), catalog.lessons.len());
}

#[tokio::test]
async fn missing_directory_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let source = FixtureSource::new(dir.path().join("nowhere"));
    assert!(source.load().await.is_err());
}
