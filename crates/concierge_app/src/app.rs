use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use concierge_core::{update, AppState, Category, Msg, ReservationStatus, SignupRole};
use page_logging::page_info;

use crate::effects::EffectRunner;
use crate::logging::{self, LogDestination};
use crate::{mock, render};

/// App-level envelope around core messages; `Quit` ends the loop without the
/// core having to know about process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AppMsg {
    Core(Msg),
    Quit,
}

pub(crate) fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let (msg_tx, msg_rx) = mpsc::channel::<AppMsg>();
    let runner = EffectRunner::new(msg_tx.clone());

    let _ = msg_tx.send(AppMsg::Core(Msg::ReservationsLoaded(
        mock::load_reservations(),
    )));
    spawn_input_thread(msg_tx);

    println!("commands: all | inprogress | completed | role customer|partner | address | quit");

    let mut state = AppState::new();
    let mut cycle: u64 = 0;
    while let Ok(app_msg) = msg_rx.recv() {
        cycle += 1;
        page_logging::set_loop_cycle(cycle);

        let msg = match app_msg {
            AppMsg::Quit => break,
            AppMsg::Core(msg) => msg,
        };

        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.run(effects);

        if state.consume_dirty() {
            for line in render::render(&state.view()) {
                println!("{line}");
            }
        }
    }

    page_info!("Session ended after {} cycles", cycle);
    Ok(())
}

fn spawn_input_thread(msg_tx: mpsc::Sender<AppMsg>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(_) => break,
            };
            let Some(msg) = parse_command(line.trim()) else {
                println!("unknown command: {}", line.trim());
                continue;
            };
            let quit = msg == AppMsg::Quit;
            if msg_tx.send(msg).is_err() || quit {
                break;
            }
        }
    });
}

fn parse_command(input: &str) -> Option<AppMsg> {
    let msg = match input {
        "quit" | "q" => AppMsg::Quit,
        "all" => AppMsg::Core(Msg::CategorySelected(Category::All)),
        "inprogress" | "in-progress" => AppMsg::Core(Msg::CategorySelected(Category::Status(
            ReservationStatus::InProgress,
        ))),
        "completed" | "done" => AppMsg::Core(Msg::CategorySelected(Category::Status(
            ReservationStatus::Completed,
        ))),
        "role customer" => AppMsg::Core(Msg::RoleSelected(SignupRole::Customer)),
        "role partner" => AppMsg::Core(Msg::RoleSelected(SignupRole::Partner)),
        "address" => AppMsg::Core(Msg::AddressLookupRequested),
        _ => return None,
    };
    Some(msg)
}
