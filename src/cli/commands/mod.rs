pub mod gateway;
pub mod logging;
pub mod users;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("usermgr")
        .about("User Management")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles);

    let command = gateway::with_args(command);
    let command = users::with_subcommands(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::gateway::{ARG_BASE_URL, ARG_ERROR_TTL, ARG_OUTPUT, ARG_TIMEOUT};
    use super::logging::ARG_VERBOSITY;
    use super::users::{ARG_EMAIL, ARG_FIRST_NAME, ARG_ID, CMD_ADD, CMD_DELETE, CMD_UPDATE};
    use super::*;
    use crate::record::RecordId;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "usermgr");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("User Management".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("USERMGR_BASE_URL", None::<&str>),
                ("USERMGR_TIMEOUT", None),
                ("USERMGR_ERROR_TTL", None),
                ("USERMGR_OUTPUT", None),
            ],
            || {
                let matches = new().get_matches_from(vec!["usermgr", "list"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_BASE_URL).cloned(),
                    Some("https://jsonplaceholder.typicode.com".to_string())
                );
                assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(10));
                assert_eq!(matches.get_one::<u64>(ARG_ERROR_TTL), None);
                assert_eq!(
                    matches.get_one::<String>(ARG_OUTPUT).cloned(),
                    Some("table".to_string())
                );
                assert_eq!(matches.subcommand_name(), Some("list"));
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("USERMGR_BASE_URL", Some("http://localhost:3000/api")),
                ("USERMGR_TIMEOUT", Some("3")),
                ("USERMGR_ERROR_TTL", Some("30")),
                ("USERMGR_OUTPUT", Some("json")),
                ("USERMGR_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["usermgr", "list"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_BASE_URL).cloned(),
                    Some("http://localhost:3000/api".to_string())
                );
                assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(3));
                assert_eq!(matches.get_one::<u64>(ARG_ERROR_TTL).copied(), Some(30));
                assert_eq!(
                    matches.get_one::<String>(ARG_OUTPUT).cloned(),
                    Some("json".to_string())
                );
                assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_u8 {
            temp_env::with_vars([("USERMGR_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["usermgr".to_string(), "list".to_string()];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(usize::from(index))));
                }

                let matches = new().get_matches_from(args);
                assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(index));
            });
        }
    }

    #[test]
    fn test_add_requires_fields() {
        let result = new().try_get_matches_from(vec![
            "usermgr",
            CMD_ADD,
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_parses_id_and_optional_fields() {
        let matches = new().get_matches_from(vec![
            "usermgr",
            CMD_UPDATE,
            "3",
            "--email",
            "ada@example.com",
        ]);
        let sub = matches.subcommand_matches(CMD_UPDATE);
        assert_eq!(
            sub.and_then(|m| m.get_one::<RecordId>(ARG_ID)).copied(),
            Some(RecordId::Remote(3))
        );
        assert_eq!(
            sub.and_then(|m| m.get_one::<String>(ARG_EMAIL)).cloned(),
            Some("ada@example.com".to_string())
        );
        assert_eq!(sub.and_then(|m| m.get_one::<String>(ARG_FIRST_NAME)), None);
    }

    #[test]
    fn test_delete_rejects_bad_id() {
        let result = new().try_get_matches_from(vec!["usermgr", CMD_DELETE, "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(new().try_get_matches_from(vec!["usermgr"]).is_err());
    }
}
