// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};
use std::path::PathBuf;

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Record id")
}

fn transaction_fields(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("description")
            .long("description")
            .short('d')
            .help("What the money was for"),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .short('a')
            .help("Amount, e.g. 12.50 or 12,50"),
    )
    .arg(Arg::new("date").long("date").help("YYYY-MM-DD"))
    .arg(
        Arg::new("category")
            .long("category")
            .short('c')
            .help("Category (defaults to Other)"),
    )
}

fn transaction_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(transaction_fields(Command::new("add").about("Record a new entry")))
        .subcommand(transaction_fields(
            Command::new("edit")
                .about("Replace the fields of an entry")
                .arg(id_arg()),
        ))
        .subcommand(Command::new("list").about("List entries, newest first").arg(json_flag()))
        .subcommand(Command::new("rm").about("Delete an entry").arg(id_arg()))
        .subcommand(
            Command::new("compare")
                .about("This month against last month")
                .arg(json_flag()),
        )
}

pub fn build_cli() -> Command {
    command!()
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding the JSON collections"),
        )
        .subcommand(Command::new("init").about("Create the data directory"))
        .subcommand(transaction_command("income", "Money coming in"))
        .subcommand(transaction_command("expense", "Money going out"))
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Create a goal")
                        .arg(Arg::new("title").long("title").short('t'))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD")),
                )
                .subcommand(
                    Command::new("progress")
                        .about("Set how much has been saved")
                        .arg(id_arg())
                        .arg(Arg::new("current").long("current").required(true)),
                )
                .subcommand(Command::new("list").about("List goals").arg(json_flag()))
                .subcommand(Command::new("rm").about("Delete a goal").arg(id_arg())),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Monthly summary and goals")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("render")
                .about("Write the HTML pages")
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("profile")
                .about("User profile")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("email").long("email")),
                )
                .subcommand(Command::new("reset").about("Restore the default profile")),
        )
        .subcommand(Command::new("doctor").about("Check stored data for problems"))
}
