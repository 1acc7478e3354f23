use crate::record::{Field, RecordId};
use clap::{Arg, Command};

pub const CMD_LIST: &str = "list";
pub const CMD_ADD: &str = "add";
pub const CMD_UPDATE: &str = "update";
pub const CMD_DELETE: &str = "delete";
pub const CMD_SHELL: &str = "shell";

pub const ARG_ID: &str = "id";
pub const ARG_FIRST_NAME: &str = "first-name";
pub const ARG_LAST_NAME: &str = "last-name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_COMPANY: &str = "company";
pub const ARG_PHONE: &str = "phone";

/// Field flags in the order they are applied to a draft.
pub const FIELD_ARGS: [(&str, Field); 5] = [
    (ARG_FIRST_NAME, Field::FirstName),
    (ARG_LAST_NAME, Field::LastName),
    (ARG_EMAIL, Field::Email),
    (ARG_COMPANY, Field::Company),
    (ARG_PHONE, Field::Phone),
];

fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("User id (server id or local UUID)")
        .required(true)
        .value_parser(clap::value_parser!(RecordId))
}

fn field_args(required: bool) -> [Arg; 5] {
    [
        Arg::new(ARG_FIRST_NAME)
            .long(ARG_FIRST_NAME)
            .help("First name")
            .required(required),
        Arg::new(ARG_LAST_NAME)
            .long(ARG_LAST_NAME)
            .help("Last name")
            .required(required),
        Arg::new(ARG_EMAIL)
            .long(ARG_EMAIL)
            .help("Email address")
            .required(required),
        Arg::new(ARG_COMPANY)
            .long(ARG_COMPANY)
            .visible_alias("department")
            .help("Company or department name")
            .required(required),
        Arg::new(ARG_PHONE).long(ARG_PHONE).help("Phone number"),
    ]
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new(CMD_LIST).about("Load and show all users"))
        .subcommand(
            Command::new(CMD_ADD)
                .about("Create a user")
                .args(field_args(true)),
        )
        .subcommand(
            Command::new(CMD_UPDATE)
                .about("Edit the given fields of a user and save")
                .arg(id_arg())
                .args(field_args(false)),
        )
        .subcommand(
            Command::new(CMD_DELETE)
                .visible_alias("rm")
                .about("Delete a user")
                .arg(id_arg()),
        )
        .subcommand(Command::new(CMD_SHELL).about("Interactive session with inline editing"))
}
