use super::*;
use pigeon_core::method::{Method, SetMyCommands};

#[test]
fn test_parse_known_commands() {
    assert_eq!(Command::parse("start"), Some(Command::Start));
    assert_eq!(Command::parse("help"), Some(Command::Help));
}

#[test]
fn test_parse_unknown_passes_through() {
    assert_eq!(Command::parse("settings"), None);
    assert_eq!(Command::parse("starts"), None);
    assert_eq!(Command::parse(""), None);
}

#[test]
fn test_parse_ignores_case() {
    assert_eq!(Command::parse("Start"), Some(Command::Start));
    assert_eq!(Command::parse("START"), Some(Command::Start));
    assert_eq!(Command::parse("hElP"), Some(Command::Help));
}

#[test]
fn test_start_reply_includes_arg() {
    assert_eq!(
        Command::Start.reply("deep-link"),
        "received start with arg deep-link"
    );
    assert_eq!(Command::Start.reply(""), "received start with arg ");
}

#[test]
fn test_help_lists_every_menu_entry() {
    let help = Command::Help.reply("ignored");
    for cmd in menu() {
        assert!(help.contains(&format!("/{}", cmd.command)));
    }
    assert!(!help.contains("ignored"));
}

#[test]
fn test_menu_is_valid_for_set_my_commands() {
    let req = SetMyCommands { commands: menu() };
    assert!(req.validate().is_ok());
}
