use storage::models::Sentiment;
use storage::sample::sample_projects;
use storage::{load_fixture, open, save_fixture};

#[test]
fn store_opens_from_saved_fixture() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("data").join("projects.json");

    let mut projects = sample_projects();
    projects[0].records[4].sentiment = Sentiment::Positive;
    save_fixture(&path, &projects).unwrap();

    let store = open(Some(&path)).unwrap();
    assert_eq!(store.projects().len(), 2);
    let record = store.current().record("100-5").unwrap();
    assert_eq!(record.sentiment, Sentiment::Positive);
}

#[test]
fn fixture_fields_default_when_missing() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("minimal.json");
    std::fs::write(&path, r#"[{ "id": "x", "title": "Пустой" }]"#).unwrap();

    let projects = load_fixture(&path).unwrap();
    assert_eq!(projects[0].title, "Пустой");
    assert!(projects[0].records.is_empty());
    assert!(projects[0].files.is_empty());
}

#[test]
fn empty_fixture_cannot_open_a_store() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("empty.json");
    std::fs::write(&path, "[]").unwrap();

    let err = open(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("no projects"));
}

#[test]
fn missing_fixture_reports_path() {
    let err = load_fixture(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(format!("{err:#}").contains("here.json"));
}
