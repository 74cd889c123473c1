use image::{Rgba, RgbaImage};
use objecttypes_project::{
    image_path, EntityRepository, EntityType, ImageLoadError, ProjectConfig, RepositoryError,
};
use std::path::Path;

const FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<objecttypes>
 <objecttype name="Wall" color="a0a0a4">
  <property name="drawbox" type="string" default="0,0,32,32"/>
  <property name="hitbox" type="string" default="0,0,32,32"/>
  <property name="class" type="string" default="StaticWall"/>
 </objecttype>
 <objecttype name="SpawnPoint" color="00ff00"/>
 <objecttype name="Enemy" color="ff0000">
  <property name="class" type="string" default="Walker"/>
  <property name="health" type="int" default="3"/>
 </objecttype>
 <objecttype name="Coin" color="ffff00">
  <property name="drawbox" type="string" default="0,0,8,8"/>
 </objecttype>
</objecttypes>
"#;

fn write_fixture(dir: &Path) {
    std::fs::write(dir.join("objecttypes.xml"), FIXTURE).unwrap();
}

fn load_fixture(dir: &Path) -> EntityRepository {
    write_fixture(dir);
    let mut repo = EntityRepository::new();
    repo.load_from(dir, "objecttypes.xml").unwrap();
    repo
}

#[test]
fn load_reads_types_in_document_order() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = load_fixture(tmp.path());

    assert!(repo.is_loaded());
    assert!(!repo.is_dirty());

    // SpawnPoint has no properties and is skipped
    let names: Vec<_> = repo.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Wall", "Enemy", "Coin"]);

    let wall = repo.get_entity_by_name("Wall").unwrap();
    assert_eq!(wall.drawbox, "0,0,32,32");
    assert_eq!(wall.hitbox, "0,0,32,32");
    assert_eq!(wall.class, "StaticWall");

    let coin = repo.get_entity(2).unwrap();
    assert_eq!(coin.drawbox, "0,0,8,8");
    assert_eq!(coin.class, "");
}

#[test]
fn lookup_of_missing_name_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = load_fixture(tmp.path());

    assert!(matches!(
        repo.get_entity_by_name("missing"),
        Err(RepositoryError::NotFound(name)) if name == "missing"
    ));
}

#[test]
fn unmodified_round_trip_is_stable() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = load_fixture(tmp.path());
    let first: Vec<EntityType> = repo.entities().to_vec();

    repo.save().unwrap();
    repo.load().unwrap();

    assert_eq!(repo.entities(), first.as_slice());
    // Extra properties and colors survive
    let enemy = repo.get_entity_by_name("Enemy").unwrap();
    assert_eq!(enemy.property("health"), Some("3"));
    assert_eq!(enemy.color, "ff0000");
}

#[test]
fn save_writes_the_file_not_the_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = load_fixture(tmp.path());

    repo.add_entity(EntityType::new("Chest").with_class("Container"))
        .unwrap();
    repo.save().unwrap();
    assert!(!repo.is_dirty());

    let written = std::fs::read_to_string(tmp.path().join("objecttypes.xml")).unwrap();
    assert!(written.contains("name=\"Chest\""));
    assert!(tmp.path().is_dir());
}

#[test]
fn add_and_remove_persist() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = load_fixture(tmp.path());

    let chest = EntityType::new("Chest")
        .with_drawbox("0,0,16,16")
        .with_hitbox("0,4,16,12")
        .with_class("Container");
    repo.add_entity(chest.clone()).unwrap();
    repo.remove_entity_by_name("Wall").unwrap();
    repo.save().unwrap();

    let mut reloaded = EntityRepository::with_config(repo.config().clone());
    reloaded.load().unwrap();

    assert_eq!(reloaded.get_entity_by_name("Chest").unwrap(), &chest);
    assert!(reloaded.get_entity_by_name("Wall").is_err());
    assert_eq!(reloaded.len(), 3);
}

#[test]
fn save_creates_missing_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("levels/forest");

    let mut repo = EntityRepository::with_config(ProjectConfig::new(&dir, "types.xml"));
    repo.create_empty();
    repo.add_entity(EntityType::new("Tree")).unwrap();
    repo.save().unwrap();

    let mut reloaded = EntityRepository::with_config(ProjectConfig::new(&dir, "types.xml"));
    reloaded.load().unwrap();
    assert_eq!(reloaded.entities(), &[EntityType::new("Tree")]);
}

#[test]
fn missing_file_leaves_repository_unloaded() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = load_fixture(tmp.path());
    assert_eq!(repo.len(), 3);

    let result = repo.load_from(tmp.path(), "nope.xml");
    assert!(matches!(result, Err(RepositoryError::Io { .. })));
    assert!(repo.is_empty());
    assert!(!repo.is_loaded());
    assert!(matches!(repo.save(), Err(RepositoryError::NotLoaded)));
}

#[test]
fn malformed_file_is_document_error() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join("objecttypes.xml"),
        "<objecttypes><objecttype name=\"A\"></objecttypes>",
    )
    .unwrap();

    let mut repo = EntityRepository::new();
    let result = repo.load_from(tmp.path(), "objecttypes.xml");
    assert!(matches!(result, Err(RepositoryError::Document(_))));
    assert!(repo.is_empty());
}

#[test]
fn duplicate_names_in_file_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join("objecttypes.xml"),
        r#"<objecttypes>
 <objecttype name="Wall"><property name="class" type="string" default="A"/></objecttype>
 <objecttype name="Wall"><property name="class" type="string" default="B"/></objecttype>
</objecttypes>"#,
    )
    .unwrap();

    let mut repo = EntityRepository::new();
    let result = repo.load_from(tmp.path(), "objecttypes.xml");
    assert!(matches!(result, Err(RepositoryError::DuplicateName(name)) if name == "Wall"));
    assert!(repo.is_empty());
    assert!(!repo.is_loaded());
}

#[test]
fn save_replaces_existing_file_without_leftovers() {
    let tmp = tempfile::tempdir().unwrap();
    let mut repo = load_fixture(tmp.path());
    repo.remove_entity_by_name("Wall").unwrap();
    repo.save().unwrap();

    let entries: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("objecttypes.xml")]);

    let mut reloaded = EntityRepository::new();
    reloaded.load_from(tmp.path(), "objecttypes.xml").unwrap();
    assert!(!reloaded.contains("Wall"));
    assert_eq!(reloaded.len(), 2);
}

#[test]
fn images_are_loaded_by_name() {
    let tmp = tempfile::tempdir().unwrap();
    let repo = load_fixture(tmp.path());

    RgbaImage::from_pixel(32, 16, Rgba([0, 0, 255, 255]))
        .save(image_path(tmp.path(), "Wall"))
        .unwrap();
    std::fs::write(image_path(tmp.path(), "Coin"), b"corrupt").unwrap();

    let wall = repo.load_image_by_name("Wall").unwrap();
    assert_eq!((wall.width(), wall.height()), (32, 16));

    assert!(repo.load_image_by_name("nonexistent").is_none());
    assert!(repo.load_image_by_name("Coin").is_none());
    assert!(matches!(
        repo.try_load_image_by_name("Coin"),
        Err(ImageLoadError::Decode { .. })
    ));
}
