//! Deferred commands, such as closing the upload window a moment after a successful upload.
//!
//! A scheduled command is delivered through the same channel user commands arrive on,
//! so it's handled in order with everything else and never touches state concurrently.

use core::time::Duration;
use tokio::{
	sync::mpsc::{UnboundedSender, WeakUnboundedSender},
	task::JoinHandle,
};
use tracing::{debug, trace};

/// Holds only a weak sender, so the channel closes once every other sender is dropped.
#[derive(Debug)]
pub struct Scheduler<C> {
	sender: WeakUnboundedSender<C>,
}

impl<C> Clone for Scheduler<C> {
	fn clone(&self) -> Self {
		Self { sender: self.sender.clone() }
	}
}

impl<C: Send + 'static> Scheduler<C> {
	#[must_use]
	pub fn new(sender: &UnboundedSender<C>) -> Self {
		Self { sender: sender.downgrade() }
	}

	/// Sends `command` after `delay`, unless the returned handle is cancelled first.
	///
	/// A pending command keeps the channel open until it's sent or cancelled.
	/// If the channel has no senders left, `command` is dropped right away.
	///
	/// Must be called from within a Tokio runtime.
	pub fn schedule(&self, delay: Duration, command: C) -> TaskHandle {
		let sender = self.sender.upgrade();
		debug!(?delay, "Scheduling a command.");
		TaskHandle(tokio::spawn(async move {
			let sender = if let Some(sender) = sender {
				sender
			} else {
				trace!("No senders are left. Dropping the scheduled command.");
				return;
			};
			tokio::time::sleep(delay).await;
			if sender.send(command).is_err() {
				trace!("The receiver is gone. Dropping the scheduled command.");
			}
		}))
	}
}

/// Handle to a scheduled command. Dropping it does *not* cancel the command.
#[derive(Debug)]
pub struct TaskHandle(JoinHandle<()>);

impl TaskHandle {
	pub fn cancel(&self) {
		self.0.abort();
	}

	#[must_use]
	pub fn is_finished(&self) -> bool {
		self.0.is_finished()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tokio::sync::mpsc::unbounded_channel;

	#[tokio::test(start_paused = true)]
	async fn delivers_after_the_delay() {
		let (sender, mut receiver) = unbounded_channel();
		let scheduler = Scheduler::new(&sender);
		let _handle = scheduler.schedule(Duration::from_millis(2500), "close");

		tokio::time::sleep(Duration::from_millis(2400)).await;
		assert!(receiver.try_recv().is_err());
		tokio::time::sleep(Duration::from_millis(200)).await;
		assert_eq!(receiver.try_recv().ok(), Some("close"));
	}

	#[tokio::test(start_paused = true)]
	async fn cancelled_commands_are_never_sent() {
		let (sender, mut receiver) = unbounded_channel();
		let scheduler = Scheduler::new(&sender);
		let handle = scheduler.schedule(Duration::from_secs(1), 1_u8);
		handle.cancel();

		tokio::time::sleep(Duration::from_secs(2)).await;
		assert!(receiver.try_recv().is_err());
		assert!(handle.is_finished());
	}

	#[tokio::test(start_paused = true)]
	async fn pending_commands_outlive_the_last_sender() {
		let (sender, mut receiver) = unbounded_channel();
		let scheduler = Scheduler::new(&sender);
		let _handle = scheduler.schedule(Duration::from_secs(1), "close");
		drop(sender);

		assert_eq!(receiver.recv().await, Some("close"));
		assert_eq!(receiver.recv().await, None);
	}

	#[tokio::test(start_paused = true)]
	async fn nothing_is_scheduled_once_every_sender_is_gone() {
		let (sender, mut receiver) = unbounded_channel::<u8>();
		let scheduler = Scheduler::new(&sender);
		drop(sender);

		let handle = scheduler.schedule(Duration::from_secs(1), 1);
		assert_eq!(receiver.recv().await, None);
		tokio::time::sleep(Duration::from_secs(2)).await;
		assert!(handle.is_finished());
	}
}
