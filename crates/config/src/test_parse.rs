#[cfg(test)]
mod tests {
    use std::{env, fs, path::Path, process};

    use crate::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = Config::from_ron("()").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.center_scale, DEFAULT_CENTER_SCALE);
        assert_eq!(cfg.activation_timeout().as_millis(), 200);
    }

    #[test]
    fn fields_override_defaults() {
        let ron = r#"(
            center_scale: 0.8,
            bounds: full,
            reselect: always,
            activation_timeout_ms: 500,
            bindings: [
                (chord: "cmd+alt+up", command: "top-half"),
            ],
        )"#;
        let cfg = Config::from_ron(ron).unwrap();
        assert_eq!(cfg.center_scale, 0.8);
        assert_eq!(cfg.bounds, BoundsMode::Full);
        assert_eq!(cfg.reselect, ReselectPolicy::Always);
        assert_eq!(cfg.poll_interval_ms, 20);
        assert_eq!(
            cfg.bindings,
            vec![Binding::new(
                "cmd+alt+up",
                LayoutCommand::Vertical(Vertical::Top)
            )]
        );
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = Config::from_ron("(center_scael: 0.5)").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "{err:?}");
    }

    #[test]
    fn unknown_command_is_a_parse_error() {
        let err = Config::from_ron(r#"(bindings: [(chord: "cmd+x", command: "sideways")])"#)
            .unwrap_err();
        assert!(err.to_string().contains("sideways"), "{err}");
    }

    #[test]
    fn out_of_range_scale_fails_validation() {
        for bad in ["0.0", "1.5", "-0.2"] {
            let err = Config::from_ron(&format!("(center_scale: {bad})")).unwrap_err();
            assert!(matches!(err, Error::Validation { .. }), "{bad}: {err:?}");
        }
    }

    #[test]
    fn zero_poll_interval_fails_validation() {
        let err = Config::from_ron("(poll_interval_ms: 0)").unwrap_err();
        assert!(err.pretty().contains("poll_interval_ms"));
    }

    #[test]
    fn load_attaches_path_to_errors() {
        let dir = env::temp_dir().join(format!("weaver-config-test-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.ron");
        fs::write(&path, "(center_scale: 3.0)").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert_eq!(err.path(), Some(path.as_path()));
        assert!(err.pretty().contains("bad.ron"));

        let good = dir.join("good.ron");
        fs::write(&good, "(bounds: full)").unwrap();
        let (cfg, used) = resolve(Some(&good)).unwrap();
        assert_eq!(cfg.bounds, BoundsMode::Full);
        assert_eq!(used.as_deref(), Some(good.as_path()));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn wrong_extension_is_rejected() {
        let err = load_from_path(Path::new("/tmp/weaver.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = resolve(Some(Path::new("/nonexistent/weaver.ron"))).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
