use std::fs;
use std::path::Path;

fn render_all_in_dir(dir: &Path) {
    assert!(dir.is_dir(), "{} is not a directory", dir.display());

    let entries: Vec<_> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", dir.display()))
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == "json")
                .unwrap_or(false)
        })
        .collect();

    assert!(!entries.is_empty(), "no .json files found in {}", dir.display());

    for entry in &entries {
        let path = entry.path();
        let source = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));

        let html = statsgrid::render_json(&source)
            .unwrap_or_else(|e| panic!("{} failed to render: {e}", path.display()));

        assert!(
            html.starts_with("<style>"),
            "{} output missing stylesheet",
            path.display()
        );

        assert!(
            html.contains(r#"<figure class="stats-grid"#) && html.ends_with("</figure>"),
            "{} output missing grid figure",
            path.display()
        );

        assert_eq!(
            html.matches("<div").count(),
            html.matches("</div>").count(),
            "{} has unbalanced divs",
            path.display()
        );
    }

    eprintln!("  rendered {} files from {}", entries.len(), dir.display());
}

#[test]
fn all_demos_render() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    render_all_in_dir(&dir);
}
