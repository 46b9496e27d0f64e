use base64::{engine::general_purpose, Engine as _};
use paraphraser_engine::{
    build_overleaf_handoff, write_overleaf_handoff, write_tex, OVERLEAF_DOCS_URL,
    OVERLEAF_HANDOFF_FILENAME, TEX_EXPORT_FILENAME,
};

#[test]
fn tex_export_uses_the_fixed_name() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = "\\begin{document}Hello\\end{document}";

    let path = write_tex(dir.path(), artifact).unwrap();
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some(TEX_EXPORT_FILENAME)
    );
    assert_eq!(std::fs::read_to_string(&path).unwrap(), artifact);
}

#[test]
fn repeated_exports_leave_no_stray_files() {
    let dir = tempfile::tempdir().unwrap();

    let first = write_tex(dir.path(), "\\begin{document}v1\\end{document}").unwrap();
    let second = write_tex(dir.path(), "\\begin{document}v2\\end{document}").unwrap();
    assert_eq!(first, second);
    assert_eq!(
        std::fs::read_to_string(&second).unwrap(),
        "\\begin{document}v2\\end{document}"
    );

    // Each write releases its temporary file: only the target remains.
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries.len(), 1, "stray files: {entries:?}");
}

#[test]
fn handoff_embeds_the_artifact_as_a_base64_data_uri() {
    let artifact = "\\begin{document}Grüße\\end{document}";
    let page = build_overleaf_handoff(artifact);

    let encoded = general_purpose::STANDARD.encode(artifact.as_bytes());
    assert!(page.contains(&format!("data:application/x-tex;base64,{encoded}")));
    assert!(page.contains("name=\"snip_uri\""));
    assert!(page.contains(&format!("action=\"{OVERLEAF_DOCS_URL}\"")));
    assert!(page.contains("target=\"_blank\""));
}

#[test]
fn handoff_page_is_written_under_the_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_overleaf_handoff(dir.path(), "\\begin{document}x\\end{document}").unwrap();
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some(OVERLEAF_HANDOFF_FILENAME)
    );
    let page = std::fs::read_to_string(&path).unwrap();
    assert!(page.contains("snip_uri"));
}
