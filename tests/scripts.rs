use std::fs;

use toylang::run_script;
use walkdir::WalkDir;

#[test]
fn demo_scripts_run_clean() {
    let mut count = 0;

    for entry in WalkDir::new("demos")
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "toy"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(error) = run_script(&source, &path.display().to_string()) {
            panic!("Demo script {path:?} failed:\n{error}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

#[test]
fn demo_scripts_survive_reformatting() {
    for entry in WalkDir::new("demos")
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "toy"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let (program, errors) = toylang::parse(&source);
        assert!(errors.is_empty(), "Demo script {path:?} has parse errors: {errors:?}");

        let pretty = toylang::format(&program);
        if let Err(error) = run_script(&pretty, &path.display().to_string()) {
            panic!("Reformatted demo script {path:?} failed:\n{error}");
        }
    }
}
