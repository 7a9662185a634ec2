// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn salary_field_args(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("employee")
            .long("employee")
            .required(required)
            .help("Employee email or ID"),
    )
    .arg(
        Arg::new("month")
            .long("month")
            .required(required)
            .help("Salary month, e.g. 2025-05-01 or 'May 2025'"),
    )
    .arg(Arg::new("worked_days").long("worked-days"))
    .arg(Arg::new("lop_days").long("lop-days"))
    .arg(Arg::new("basic").long("basic"))
    .arg(Arg::new("bonus").long("bonus"))
    .arg(Arg::new("pf").long("pf"))
    .arg(Arg::new("professional_tax").long("professional-tax"))
    .arg(Arg::new("tds").long("tds"))
}

pub fn build_cli() -> Command {
    command!()
        .name("payclip")
        .about("Payroll processing ledger, payslips and salary reports")
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("salary")
                .about("Process and maintain salary runs")
                .subcommand(salary_field_args(
                    Command::new("process").about("Validate fields and record a salary run"),
                    true,
                ))
                .subcommand(salary_field_args(
                    Command::new("edit")
                        .about("Edit a salary run; omitted fields keep their value")
                        .arg(Arg::new("id").required(true)),
                    false,
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("search")
                            .long("search")
                            .help("Substring of employee key or month"),
                    ),
                ))
                .subcommand(Command::new("show").arg(Arg::new("id").required(true)))
                .subcommand(
                    Command::new("payslip")
                        .about("Write the payslip of one run to a file")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("out").long("out").default_value(".")),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export processed salaries")
                .subcommand(
                    Command::new("salaries")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json|report"),
                        )
                        .arg(Arg::new("out").long("out"))
                        .arg(Arg::new("search").long("search")),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import processed salaries")
                .subcommand(
                    Command::new("salaries").arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("employee")
                .about("Employee registry")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("designation").long("designation"))
                        .arg(Arg::new("doj").long("doj").help("YYYY-MM-DD"))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("location").long("location")),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(Arg::new("search").long("search")),
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(
                    Command::new("fetch").about("Sync employees from the HR service"),
                ),
        )
        .subcommand(
            Command::new("payroll")
                .about("Browse the remote payroll feed")
                .subcommand(json_flags(
                    Command::new("show").arg(
                        Arg::new("search")
                            .long("search")
                            .help("Employee ID or name"),
                    ),
                ))
                .subcommand(
                    Command::new("download")
                        .arg(Arg::new("filename").required(true))
                        .arg(Arg::new("out").long("out").default_value(".")),
                ),
        )
        .subcommand(
            Command::new("salary-info")
                .about("Annual salary sheet helpers")
                .subcommand(json_flags(
                    Command::new("monthly")
                        .arg(Arg::new("employee").long("employee").default_value("INDTEST"))
                        .arg(
                            Arg::new("field")
                                .long("field")
                                .action(ArgAction::Append)
                                .required(true)
                                .help("component=annual amount, repeatable"),
                        ),
                )),
        )
        .subcommand(Command::new("doctor").about("Report duplicate salary runs"))
}
