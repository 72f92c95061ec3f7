use prefkit::{Key, OpenError, Settings, StoreConfig, DOMAIN_ENV, HOME_ENV};

// Only test in this binary, so the environment is not shared with others.
#[test]
fn test_standard_honors_environment() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var(HOME_ENV, dir.path());
    std::env::set_var(DOMAIN_ENV, "com.example.standard");

    let defaults = prefkit::standard("com.example.ignored").unwrap();
    defaults.set(&5, &Key::<i64>::from_static("count"));

    assert!(dir.path().join("com.example.standard.json").exists());
    assert!(!dir.path().join("com.example.ignored.json").exists());

    let reopened = prefkit::open(&StoreConfig::new("com.example.standard", dir.path())).unwrap();
    assert_eq!(reopened.get(&Key::<i64>::from_static("count")), Some(5));

    std::env::set_var(DOMAIN_ENV, "not a domain");
    assert!(matches!(
        prefkit::standard("com.example.ignored"),
        Err(OpenError::Store(_))
    ));

    std::env::remove_var(HOME_ENV);
    std::env::remove_var(DOMAIN_ENV);
}
