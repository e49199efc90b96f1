// SPDX-License-Identifier: GPL-3.0-only

//! One-shot command sender for the Hamster daemon.
//!
//! Fire-and-forget counterpart to the `tracklet` watcher: each invocation
//! connects, issues a single command, and exits.

use std::process;
use tracklet::dbus::{DbusError, DbusResult, TrackerClient};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        usage();
        process::exit(1);
    }

    let result = match (args[0].as_str(), args.get(1)) {
        ("stop", None) => run(|c| async move { c.stop_tracking_now().await }),
        ("add", Some(fact)) => {
            let fact = fact.clone();
            run(|c| async move {
                let id = c.add_fact(&fact).await?;
                println!("started fact {id}");
                Ok(())
            })
        }
        ("overview", None) => run(|c| async move { c.overview().await }),
        ("edit", None) => run(|c| async move { c.add_earlier().await }),
        ("edit", Some(id)) => match id.parse::<i32>() {
            Ok(id) => run(move |c| async move { c.edit_fact(id).await }),
            Err(_) => {
                eprintln!("edit takes a numeric fact id, got: {id}");
                usage();
                process::exit(1);
            }
        },
        ("prefs", None) => run(|c| async move { c.preferences().await }),
        _ => {
            eprintln!("unknown command: {}", args.join(" "));
            usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("tracker not reachable: {e}");
        process::exit(1);
    }
}

/// Connect and run one command on a current-thread runtime.
fn run<F, Fut>(op: F) -> DbusResult<()>
where
    F: FnOnce(TrackerClient) -> Fut,
    Fut: Future<Output = DbusResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| DbusError::ConnectionFailed(e.to_string()))?;
    runtime.block_on(async {
        let client = TrackerClient::connect().await?;
        op(client).await
    })
}

fn usage() {
    eprintln!("usage: tracklet-ctl <command>");
    eprintln!();
    eprintln!("commands:");
    eprintln!("  stop                 stop the running activity");
    eprintln!("  add <name@category>  start tracking a new activity");
    eprintln!("  overview             open the overview window");
    eprintln!("  edit [id]            edit a fact, or add an earlier one");
    eprintln!("  prefs                open tracking preferences");
}
