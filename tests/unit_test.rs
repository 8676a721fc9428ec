// Unit tests for usrapi-manager
// These tests work with the public API without touching the network

#[cfg(test)]
mod model_tests {
    use serde_json::json;
    use usrapi_manager::model::{CreateUserDraft, UpdateUserDraft, User};

    #[test]
    fn test_user_deserializes_without_optional_fields() {
        let user: User = serde_json::from_value(json!({
            "id": "1",
            "name": "John",
            "surname": "Doe",
            "email": "john@example.com"
        }))
        .expect("decode user");
        assert_eq!(user.id, "1");
        assert_eq!(user.company, None);
        assert_eq!(user.job_title, None);
    }

    #[test]
    fn test_user_reads_camel_case_job_title() {
        let user: User = serde_json::from_value(json!({
            "id": "a1",
            "name": "Ann",
            "surname": "Lee",
            "email": "ann@example.com",
            "company": "Acme",
            "jobTitle": "Engineer"
        }))
        .expect("decode user");
        assert_eq!(user.job_title.as_deref(), Some("Engineer"));
    }

    #[test]
    fn test_create_draft_has_no_id() {
        let draft = CreateUserDraft {
            name: "Jane".into(),
            surname: "Roe".into(),
            email: "jane@example.com".into(),
            company: Some("Acme".into()),
            job_title: Some("Dev".into()),
        };
        let value = serde_json::to_value(&draft).expect("encode draft");
        assert!(value.get("id").is_none());
        assert_eq!(value["jobTitle"], "Dev");
        assert!(value.get("job_title").is_none());
    }

    #[test]
    fn test_update_draft_carries_id() {
        let draft = UpdateUserDraft {
            id: "42".into(),
            name: "Jane".into(),
            surname: "Roe".into(),
            email: "jane@example.com".into(),
            company: None,
            job_title: None,
        };
        let value = serde_json::to_value(&draft).expect("encode draft");
        assert_eq!(value["id"], "42");
        assert!(value.get("company").is_none());
    }
}

#[cfg(test)]
mod keymap_tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use usrapi_manager::app::keymap::{KeyAction, Keymap};

    fn press(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn test_default_bindings() {
        let km = Keymap::default();
        assert_eq!(
            km.resolve(&press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            km.resolve(&press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(KeyAction::Activate)
        );
        assert_eq!(
            km.resolve(&press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(KeyAction::Cancel)
        );
        assert_eq!(km.resolve(&press(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_config_overrides_and_skips_bad_lines() {
        let km = Keymap::from_config_str(
            "# comment\nQuit = Ctrl+x\nToggleColumns = v\nNope = z\nMoveUp = ??\nno equals sign\n",
        );
        assert_eq!(
            km.resolve(&press(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            km.resolve(&press(KeyCode::Char('v'), KeyModifiers::NONE)),
            Some(KeyAction::ToggleColumns)
        );
        assert_eq!(km.resolve(&press(KeyCode::Char('z'), KeyModifiers::NONE)), None);
        // defaults survive
        assert_eq!(
            km.resolve(&press(KeyCode::Char('c'), KeyModifiers::NONE)),
            Some(KeyAction::ToggleColumns)
        );
    }

    #[test]
    fn test_keys_for_is_sorted_and_formatted() {
        let km = Keymap::default();
        assert_eq!(km.keys_for(KeyAction::Cancel), vec!["Esc".to_string()]);
        let activate = km.keys_for(KeyAction::Activate);
        assert!(activate.contains(&"Ctrl+s".to_string()));
        assert!(activate.contains(&"Space".to_string()));
        let mut sorted = activate.clone();
        sorted.sort();
        assert_eq!(activate, sorted);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("usrapi_manager_missing_keybinds.conf");
        let _ = std::fs::remove_file(&path);
        assert!(Keymap::from_file(&path).is_none());
        let km = Keymap::load(Some(&path));
        assert_eq!(
            km.resolve(&press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(KeyAction::Quit)
        );
    }
}

#[cfg(test)]
mod theme_tests {
    use ratatui::style::Color;
    use usrapi_manager::app::Theme;

    #[test]
    fn test_from_config_str_overrides_known_keys() {
        let t = Theme::from_config_str("error = #ff0000\nhighlight_bg = reset\n# text = #000000\n");
        assert_eq!(t.error, Color::Rgb(0xff, 0, 0));
        assert_eq!(t.highlight_bg, Color::Reset);
        assert_eq!(t.text, Theme::mocha().text);
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let t = Theme::from_config_str("error = red\nsuccess = #12345\nbogus = #000000\n");
        assert_eq!(t, Theme::mocha());
    }

    #[test]
    fn test_load_without_path_is_mocha() {
        assert_eq!(Theme::load(None), Theme::mocha());
    }

    #[test]
    fn test_load_reads_file() {
        let nonce = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("usrapi_theme_{}_{}.conf", std::process::id(), nonce));
        std::fs::write(&path, "title = 010203\n").expect("write theme");
        let t = Theme::load(Some(&path));
        assert_eq!(t.title, Color::Rgb(1, 2, 3));
        let _ = std::fs::remove_file(&path);
    }
}

#[cfg(test)]
mod config_tests {
    use clap::Parser;
    use usrapi_manager::config::Cli;

    #[test]
    fn test_api_url_flag() {
        let cli = Cli::try_parse_from(["usrapi-manager", "--api-url", "http://localhost:8000"])
            .expect("parse");
        assert_eq!(cli.api_url, "http://localhost:8000");
        assert!(cli.theme.is_none());
        assert!(cli.keybinds.is_none());
    }

    #[test]
    fn test_optional_paths() {
        let cli = Cli::try_parse_from([
            "usrapi-manager",
            "--api-url",
            "http://x",
            "--log-file",
            "/tmp/u.log",
            "--theme",
            "t.conf",
            "--keybinds",
            "k.conf",
        ])
        .expect("parse");
        assert_eq!(cli.log_file.as_deref(), Some(std::path::Path::new("/tmp/u.log")));
        assert_eq!(cli.theme.as_deref(), Some(std::path::Path::new("t.conf")));
        assert_eq!(cli.keybinds.as_deref(), Some(std::path::Path::new("k.conf")));
    }
}

#[cfg(test)]
mod table_tests {
    use usrapi_manager::model::User;
    use usrapi_manager::ui::table::{Column, ColumnVisibility, TableModel, short_id, table_model};

    fn user(id: &str) -> User {
        User {
            id: id.into(),
            name: "John".into(),
            surname: "Doe".into(),
            email: "john@example.com".into(),
            company: None,
            job_title: Some("Dev".into()),
        }
    }

    #[test]
    fn test_short_id_takes_six_chars() {
        assert_eq!(short_id("123e4567-e89b"), "123e45...");
        assert_eq!(short_id("1"), "1...");
    }

    #[test]
    fn test_default_columns() {
        let vis = ColumnVisibility::default();
        assert_eq!(
            vis.visible(),
            vec![Column::Uuid, Column::Name, Column::Surname, Column::Email]
        );
    }

    #[test]
    fn test_toggle_adds_column_in_fixed_order() {
        let mut vis = ColumnVisibility::default();
        vis.toggle(Column::JobTitle);
        vis.toggle(Column::Name);
        assert_eq!(
            vis.visible(),
            vec![Column::Uuid, Column::Surname, Column::Email, Column::JobTitle]
        );
    }

    #[test]
    fn test_table_model_states() {
        let vis = ColumnVisibility::default();
        assert_eq!(table_model(&[user("1")], true, &vis), TableModel::Loading);
        assert_eq!(table_model(&[], false, &vis), TableModel::Empty);
        match table_model(&[user("abcdefgh")], false, &vis) {
            TableModel::Rows { columns, rows } => {
                assert_eq!(columns.len(), 4);
                assert_eq!(rows[0][0], "abcdef...");
                assert_eq!(rows[0][3], "john@example.com");
            }
            other => panic!("unexpected model: {other:?}"),
        }
    }

    #[test]
    fn test_missing_optional_renders_blank() {
        assert_eq!(Column::Company.cell(&user("1")), "");
        assert_eq!(Column::JobTitle.cell(&user("1")), "Dev");
    }
}
