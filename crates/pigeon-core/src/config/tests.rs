use super::*;

const TOKEN: &str = "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11";

fn with_token() -> Config {
    let mut cfg = Config::default();
    cfg.bot.token = TOKEN.to_string();
    cfg
}

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.bot.api_url, "https://api.telegram.org");
    assert_eq!(cfg.bot.log_level, "info");
    assert_eq!(cfg.polling.limit, 100);
    assert_eq!(cfg.polling.timeout_secs, 30);
    assert_eq!(cfg.polling.queue_capacity, 64);
    assert_eq!(cfg.dispatch.reply, ReplyMode::Echo);
    assert_eq!(cfg.dispatch.choice_prefix, "sex:");
    assert_eq!(cfg.dispatch.choices.len(), 2);
    assert_eq!(cfg.dispatch.choice_reply, "Your choice: {choice}");
    assert!(cfg.dispatch.commands);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let toml_str = r#"
        [bot]
        token = "1:abc"

        [polling]
        timeout_secs = 60

        [dispatch]
        reply = "greeting"
        greeting = "Hello there"
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.bot.token, "1:abc");
    assert_eq!(cfg.bot.api_url, "https://api.telegram.org");
    assert_eq!(cfg.polling.timeout_secs, 60);
    assert_eq!(cfg.polling.limit, 100);
    assert_eq!(cfg.dispatch.reply, ReplyMode::Greeting);
    assert_eq!(cfg.dispatch.greeting, "Hello there");
    assert_eq!(cfg.dispatch.location_button, "Share your location");
}

#[test]
fn test_survey_choices_from_toml() {
    let toml_str = r#"
        [dispatch]
        reply = "survey"
        prompt = "Pick a color:"
        choice_prefix = "color:"
        choices = [
            { label = "Red", data = "red" },
            { label = "Blue", data = "blue" },
        ]
        choice_reply = "Color set to {choice}"
    "#;
    let cfg: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(cfg.dispatch.reply, ReplyMode::Survey);
    assert_eq!(cfg.dispatch.choices[1].data, "blue");
    assert_eq!(cfg.dispatch.choice_reply, "Color set to {choice}");
    assert_eq!(cfg.dispatch.ack_text, "Your configs changed");
}

#[test]
fn test_unknown_reply_mode_is_rejected() {
    let err = toml::from_str::<Config>("[dispatch]\nreply = \"shout\"").unwrap_err();
    assert!(err.to_string().contains("shout"));
}

#[test]
fn test_validate_token() {
    let mut cfg = Config::default();
    assert!(cfg.validate().unwrap_err().is_unauthorized());

    cfg.bot.token = "Put your bot token here!".to_string();
    assert!(cfg.validate().unwrap_err().is_unauthorized());

    assert!(with_token().validate().is_ok());
}

#[test]
fn test_validate_polling_bounds() {
    let mut cfg = with_token();
    cfg.polling.limit = 0;
    assert!(matches!(cfg.validate(), Err(PigeonError::Config(_))));

    let mut cfg = with_token();
    cfg.polling.queue_capacity = 0;
    assert!(matches!(cfg.validate(), Err(PigeonError::Config(_))));

    let mut cfg = with_token();
    cfg.polling.offset = -5;
    assert!(matches!(cfg.validate(), Err(PigeonError::Config(_))));
}

#[test]
fn test_validate_survey_needs_choices() {
    let mut cfg = with_token();
    cfg.dispatch.reply = ReplyMode::Survey;
    cfg.dispatch.choices.clear();
    assert!(matches!(cfg.validate(), Err(PigeonError::Config(_))));
}

#[test]
fn test_mask_token() {
    assert_eq!(mask_token(TOKEN), "123456:***");
    assert_eq!(mask_token("garbage"), "***");
    assert_eq!(mask_token(""), "");
    assert_eq!(with_token().masked_token(), "123456:***");
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/nonexistent/__pigeon_config__.toml").unwrap();
    assert!(cfg.bot.token.is_empty());
    assert_eq!(cfg.polling.limit, 100);
}

#[test]
fn test_load_from_file() {
    let dir = std::env::temp_dir().join(format!("__pigeon_config_test_{}__", std::process::id()));
    let _ = std::fs::create_dir_all(&dir);
    let path = dir.join("config.toml");
    std::fs::write(&path, format!("[bot]\ntoken = \"{TOKEN}\"\ndebug = true\n")).unwrap();

    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.bot.token, TOKEN);
    assert!(cfg.bot.debug);

    std::fs::write(&path, "[bot\n").unwrap();
    assert!(matches!(
        load(path.to_str().unwrap()),
        Err(PigeonError::Config(_))
    ));

    let _ = std::fs::remove_dir_all(&dir);
}
