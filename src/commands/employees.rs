// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::feed::FeedClient;
use crate::models::Employee;
use crate::registry::EmployeeRegistry;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let mut registry = EmployeeRegistry::load(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let get = |k: &str| {
                sub.get_one::<String>(k)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default()
            };
            let e = Employee {
                id: get("id"),
                name: get("name"),
                designation: get("designation"),
                doj: get("doj"),
                email: get("email"),
                location: get("location"),
                ..Employee::default()
            };
            let id = e.id.clone();
            registry.add(e)?;
            registry.flush(conn)?;
            println!("Added employee '{}'", id);
        }
        Some(("list", sub)) => {
            let term = sub.get_one::<String>("search").map(String::as_str).unwrap_or("");
            let found = registry.search(term);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &found)? {
                let rows = found
                    .iter()
                    .map(|e| {
                        vec![
                            e.id.clone(),
                            e.name.clone(),
                            e.designation.clone(),
                            e.doj.clone(),
                            e.email.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Name", "Designation", "Joined", "Email"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            if registry.remove(id) {
                registry.flush(conn)?;
                println!("Removed employee '{}'", id.trim());
            } else {
                println!("No employee '{}'; nothing removed", id.trim());
            }
        }
        Some(("fetch", _)) => {
            let client = FeedClient::new(cfg)?;
            let fetched = client.fetch_employees()?;
            let total = fetched.len();
            let synced = registry.sync(fetched);
            registry.flush(conn)?;
            println!("Synced {} of {} employees from {}", synced, total, cfg.api_base);
        }
        _ => {}
    }
    Ok(())
}
