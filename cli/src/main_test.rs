use super::*;

#[test]
fn parse_category_accepts_select_values() {
    assert_eq!(parse_category("notHere"), Ok(ProblemCategory::NotHere));
    assert_eq!(parse_category("other"), Ok(ProblemCategory::Other));
}

#[test]
fn parse_category_lists_choices_on_error() {
    let err = parse_category("flooded").unwrap_err();
    assert!(err.contains("flooded"));
    assert!(err.contains("notHere, overload, broken, other"));
}

#[test]
fn parse_place_id_rejects_blank() {
    assert!(parse_place_id(" ").is_err());
    assert_eq!(parse_place_id("p1").unwrap().as_str(), "p1");
}

#[test]
fn guess_mime_type_by_extension() {
    assert_eq!(guess_mime_type(Path::new("a/b/photo.JPG")), Some("image/jpeg"));
    assert_eq!(guess_mime_type(Path::new("x.png")), Some("image/png"));
    assert_eq!(guess_mime_type(Path::new("notes.txt")), None);
    assert_eq!(guess_mime_type(Path::new("no_extension")), None);
}

#[test]
fn cli_parses_report_command() {
    let cli = Cli::try_parse_from([
        "place-report",
        "--base-url",
        "http://localhost:8000",
        "report",
        "--place-id",
        "p1",
        "--category",
        "broken",
    ])
    .unwrap();
    assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8000"));
    match cli.command {
        Command::Report(args) => {
            assert_eq!(args.category, ProblemCategory::Broken);
            assert!(args.image.is_none());
        }
        Command::Upload(_) => panic!("expected report"),
    }
}

#[test]
fn cli_rejects_unknown_category() {
    let res = Cli::try_parse_from(["place-report", "report", "--place-id", "p1", "--category", "meh"]);
    assert!(res.is_err());
}
