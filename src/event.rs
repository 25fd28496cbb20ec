use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize,
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                        Ok(Event::Resize(_, _)) => tx.send(AppEvent::Resize),
                        Ok(_) => Ok(()),
                        Err(err) => {
                            tracing::warn!(error = %err, "terminal event read failed");
                            Ok(())
                        }
                    };
                    if forwarded.is_err() {
                        return;
                    }
                } else if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
