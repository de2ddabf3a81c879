//! Interface node
//!
//! The keypad/LCD board holds no durable state. It asks the actuation node
//! whether a password exists, enrolls one if not, then loops on the main
//! menu: every action is gated by a password check, and three consecutive
//! wrong entries raise the alarm on both boards.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use garage_hal::{Deadline, DisplayError, Key, Keypad, Link, PeriodicTimer, TextDisplay};
use garage_protocol::{Command, CommandChannel, Password, PASSWORD_LEN};

use super::error::NodeError;
use super::screen::{
    Screen, MENU_CHANGE, MENU_OPEN, PROMPT_ENTER, PROMPT_REENTER, PROMPT_SAME,
};
use crate::config::KEY_REPEAT_MS;
use crate::lockout::{AttemptOutcome, WrongAttempts};
use crate::sequencer::{Sequence, Sequencer};

/// Column where the confirmation prompt's masked digits start
const SAME_PASS_ECHO_COL: u8 = PROMPT_SAME.len() as u8;

/// Main menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuChoice {
    /// `+`: open the door
    OpenDoor,
    /// `-`: enroll a new password
    ChangePassword,
}

/// How a gated action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttemptResult {
    /// Password accepted and the action carried out
    Granted,
    /// Third consecutive mismatch; the alarm has run
    LockedOut,
}

/// Keypad/LCD board controller
pub struct InterfaceNode<'a, L, K, P, D, T> {
    channel: CommandChannel<L>,
    keypad: K,
    screen: Screen<P>,
    delay: D,
    sequencer: &'a Sequencer,
    timer: T,
    attempts: WrongAttempts,
    sequence_deadline: Deadline,
}

impl<'a, L, K, P, D, T> InterfaceNode<'a, L, K, P, D, T>
where
    L: Link,
    K: Keypad,
    P: TextDisplay,
    D: DelayNs,
    T: PeriodicTimer,
{
    /// Create an interface node
    ///
    /// `sequencer` must be the instance the tick interrupt behind `timer`
    /// advances.
    pub fn new(
        channel: CommandChannel<L>,
        keypad: K,
        display: P,
        delay: D,
        sequencer: &'a Sequencer,
        timer: T,
    ) -> Self {
        Self {
            channel,
            keypad,
            screen: Screen::new(display),
            delay,
            sequencer,
            timer,
            attempts: WrongAttempts::new(),
            sequence_deadline: Deadline::Never,
        }
    }

    /// Bound the wait for a sequence's terminal tick
    pub fn with_sequence_deadline(mut self, deadline: Deadline) -> Self {
        self.sequence_deadline = deadline;
        self
    }

    /// Boot, then serve the menu until a fatal error
    pub fn run(&mut self) -> Result<Infallible, NodeError<L::Error>> {
        self.boot()?;
        loop {
            self.step()?;
        }
    }

    /// Enroll a password unless the actuation node already has one
    pub fn boot(&mut self) -> Result<(), NodeError<L::Error>> {
        loop {
            self.channel.send_command(Command::CheckIfSaved)?;
            let reply = self.channel.receive_reply()?;
            match Command::from_byte(reply) {
                Some(Command::YesSaved) => {
                    info!("password on record");
                    return Ok(());
                }
                Some(Command::NoSavedPassword) => {
                    info!("no password on record, enrolling");
                    return self.enroll();
                }
                _ => warn!("unexpected reply {=u8:#x} to saved-password query", reply),
            }
        }
    }

    /// Collect a password twice until the actuation node accepts the pair
    pub fn enroll(&mut self) -> Result<(), NodeError<L::Error>> {
        loop {
            self.screen.show(PROMPT_ENTER, "")?;
            let first = self.read_password(0)?;
            self.channel.send_command(Command::PasswordSend)?;
            self.channel.send_payload(&first)?;

            self.screen.show(PROMPT_REENTER, PROMPT_SAME)?;
            let second = self.read_password(SAME_PASS_ECHO_COL)?;
            self.channel
                .send_command(Command::PasswordConfirmationSend)?;
            self.channel.send_payload(&second)?;

            let reply = self.channel.receive_reply()?;
            if Command::from_byte(reply) == Some(Command::PasswordMatch) {
                info!("enrollment accepted");
                return Ok(());
            }
            debug!("enrollment rejected ({=u8:#x})", reply);
        }
    }

    /// Show the menu and wait for `+` or `-`
    pub fn menu(&mut self) -> Result<MenuChoice, NodeError<L::Error>> {
        loop {
            self.screen.show(MENU_OPEN, MENU_CHANGE)?;
            let key = self.keypad.read_key();
            self.delay.delay_ms(KEY_REPEAT_MS);
            match key {
                Key::Plus => return Ok(MenuChoice::OpenDoor),
                Key::Minus => return Ok(MenuChoice::ChangePassword),
                _ => {}
            }
        }
    }

    /// One pass of the main menu
    pub fn step(&mut self) -> Result<(MenuChoice, AttemptResult), NodeError<L::Error>> {
        let choice = self.menu()?;
        debug!("menu choice {}", choice);
        let result = self.authorize(choice)?;
        Ok((choice, result))
    }

    /// Gate `choice` behind a password check
    ///
    /// Re-prompts after a mismatch until the third one in a row, which
    /// triggers the alarm instead.
    pub fn authorize(&mut self, choice: MenuChoice) -> Result<AttemptResult, NodeError<L::Error>> {
        loop {
            self.screen.show(PROMPT_ENTER, "")?;
            let candidate = self.read_password(0)?;
            self.channel.send_command(Command::CheckPassword)?;
            self.channel.send_payload(&candidate)?;

            let reply = self.channel.receive_reply()?;
            match Command::from_byte(reply) {
                Some(Command::PasswordMatch) => {
                    self.attempts.reset();
                    match choice {
                        MenuChoice::OpenDoor => self.open_door()?,
                        MenuChoice::ChangePassword => self.enroll()?,
                    }
                    return Ok(AttemptResult::Granted);
                }
                Some(Command::PasswordNotMatched) => match self.attempts.record_mismatch() {
                    AttemptOutcome::Retry { remaining } => {
                        info!("wrong password, {} attempts left", remaining);
                    }
                    AttemptOutcome::Lockout => {
                        self.lockout()?;
                        return Ok(AttemptResult::LockedOut);
                    }
                },
                _ => warn!("unexpected reply {=u8:#x} to password check", reply),
            }
        }
    }

    /// Get the wrong-attempt counter
    pub fn attempts(&self) -> &WrongAttempts {
        &self.attempts
    }

    /// Get the display
    pub fn display(&self) -> &P {
        self.screen.display()
    }

    /// Get the command channel
    pub fn channel(&self) -> &CommandChannel<L> {
        &self.channel
    }

    /// Get the keypad
    pub fn keypad(&self) -> &K {
        &self.keypad
    }

    /// Get the sequence timer
    pub fn timer(&self) -> &T {
        &self.timer
    }

    fn open_door(&mut self) -> Result<(), NodeError<L::Error>> {
        self.channel.send_command(Command::OpenDoor)?;
        self.run_sequence(Sequence::Door)
    }

    fn lockout(&mut self) -> Result<(), NodeError<L::Error>> {
        warn!("too many wrong passwords, raising alarm");
        self.channel.send_command(Command::WrongPassword)?;
        self.run_sequence(Sequence::Alarm)?;
        self.attempts.reset();
        Ok(())
    }

    /// Meet the actuation node so both timers start together, then run
    fn run_sequence(&mut self, sequence: Sequence) -> Result<(), NodeError<L::Error>> {
        self.channel.initiate_rendezvous()?;
        self.sequencer.run(
            sequence,
            &mut self.timer,
            &mut self.screen,
            self.sequence_deadline,
        )?;
        Ok(())
    }

    /// Collect five digits confirmed with `=`
    ///
    /// Each digit is masked on the second line starting at `echo_col`.
    /// Digits past the fifth, `=` before the fifth and every other key are
    /// ignored.
    fn read_password(&mut self, echo_col: u8) -> Result<Password, DisplayError> {
        let mut digits = [0u8; PASSWORD_LEN];
        let mut entered = 0;
        loop {
            let key = self.keypad.read_key();
            match key {
                Key::Digit(d) if entered < PASSWORD_LEN => {
                    digits[entered] = d;
                    self.screen.echo(echo_col + entered as u8)?;
                    entered += 1;
                }
                Key::Equals if entered == PASSWORD_LEN => break,
                _ => {}
            }
            self.delay.delay_ms(KEY_REPEAT_MS);
        }
        Ok(Password::from_bytes(digits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::screen::{MSG_ALERT, MSG_LOCKING, MSG_UNLOCKING};
    use crate::testing::{RecordingDisplay, ScriptedKeypad, SteppedTimer, TallyDelay};
    use garage_protocol::mock::ScriptedLink;
    use garage_protocol::{ChannelError, DONE, READY};

    type TestNode<'a> = InterfaceNode<
        'a,
        ScriptedLink,
        ScriptedKeypad,
        RecordingDisplay,
        TallyDelay,
        SteppedTimer<'a>,
    >;

    fn node<'a>(seq: &'a Sequencer, inbound: &[u8], keys: &str) -> TestNode<'a> {
        InterfaceNode::new(
            CommandChannel::with_deadline(ScriptedLink::new(inbound), Deadline::Polls(8)),
            ScriptedKeypad::new(keys),
            RecordingDisplay::default(),
            TallyDelay::default(),
            seq,
            SteppedTimer::new(seq),
        )
    }

    /// Actuation-node bytes for one command + payload + reply exchange
    fn check_exchange(reply: u8) -> Vec<u8> {
        vec![READY, DONE, READY, READY, reply]
    }

    /// Bytes the interface node sends for one command + payload + reply
    fn sent_exchange(command: u8, digits: [u8; 5]) -> Vec<u8> {
        let mut out = vec![READY, command, READY];
        out.extend_from_slice(&digits);
        out.push(READY);
        out
    }

    #[test]
    fn test_boot_with_saved_password_skips_enrollment() {
        let seq = Sequencer::new();
        let mut n = node(&seq, &[READY, DONE, READY, 0xF4], "");

        n.boot().unwrap();

        assert_eq!(n.channel().link().sent(), &[READY, 0xF5, READY]);
        assert!(n.display().draws.is_empty());
    }

    #[test]
    fn test_boot_without_password_enrolls() {
        let seq = Sequencer::new();
        let mut inbound = vec![READY, DONE, READY, 0xF3];
        inbound.extend_from_slice(&[READY, DONE, READY]); // PASSWORD_SEND + payload
        inbound.extend_from_slice(&[READY, DONE, READY]); // confirmation + payload
        inbound.extend_from_slice(&[READY, 0xFC]); // reply
        let mut n = node(&seq, &inbound, "12345=12345=");

        n.boot().unwrap();

        let mut expected = vec![READY, 0xF5, READY];
        expected.extend_from_slice(&[READY, 0xFD, READY, 1, 2, 3, 4, 5]);
        expected.extend_from_slice(&[READY, 0xFA, READY, 1, 2, 3, 4, 5]);
        expected.push(READY);
        assert_eq!(n.channel().link().sent(), expected.as_slice());
        assert!(n.channel().link().is_drained());
        assert!(n.display().contains(PROMPT_REENTER));
        assert!(n.display().contains(PROMPT_SAME));
    }

    #[test]
    fn test_enrollment_repeats_until_match() {
        let seq = Sequencer::new();
        let mut inbound = Vec::new();
        for reply in [0xFB, 0xFC] {
            inbound.extend_from_slice(&[READY, DONE, READY, READY, DONE, READY, READY, reply]);
        }
        let mut n = node(&seq, &inbound, "11111=22222=33333=33333=");

        n.enroll().unwrap();

        assert_eq!(n.keypad().remaining(), 0);
        let sent = n.channel().link().sent();
        assert_eq!(&sent[sent.len() - 9..], &[READY, 0xFA, READY, 3, 3, 3, 3, 3, READY]);
    }

    #[test]
    fn test_digit_entry_rules() {
        let seq = Sequencer::new();
        let mut n = node(&seq, &[], "=12+3456789=");

        let pw = n.read_password(0).unwrap();

        assert_eq!(pw.as_bytes(), &[1, 2, 3, 4, 5]);
        // Exactly five masked digits at columns 0..5 on the second line
        let echoes: Vec<(u8, u8)> = n
            .display()
            .draws
            .iter()
            .map(|(row, col, _)| (*row, *col))
            .collect();
        assert_eq!(echoes, vec![(1, 0), (1, 1), (1, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn test_confirmation_echo_follows_prompt() {
        let seq = Sequencer::new();
        let mut n = node(&seq, &[], "98765=");

        n.read_password(SAME_PASS_ECHO_COL).unwrap();

        assert_eq!(n.display().draws[0].1, 10);
        assert_eq!(n.display().draws[4].1, 14);
    }

    #[test]
    fn test_menu_ignores_other_keys() {
        let seq = Sequencer::new();
        let mut n = node(&seq, &[], "7*=-");

        assert_eq!(n.menu().unwrap(), MenuChoice::ChangePassword);
        // Menu redrawn for each ignored key
        assert_eq!(n.display().clears, 4);
    }

    #[test]
    fn test_open_door_after_match() {
        let seq = Sequencer::new();
        let mut inbound = check_exchange(0xFC);
        inbound.extend_from_slice(&[READY, DONE, READY]); // OPEN_DOOR + rendezvous
        let mut n = node(&seq, &inbound, "+12345=");

        assert_eq!(
            n.step().unwrap(),
            (MenuChoice::OpenDoor, AttemptResult::Granted)
        );

        let mut expected = sent_exchange(0xF7, [1, 2, 3, 4, 5]);
        expected.extend_from_slice(&[READY, 0xF8, READY]);
        assert_eq!(n.channel().link().sent(), expected.as_slice());
        assert!(n.display().contains(MSG_UNLOCKING));
        assert!(n.display().contains(MSG_LOCKING));
        assert_eq!(n.timer().ticks_delivered(), 33);
        assert_eq!(n.attempts().count(), 0);
    }

    #[test]
    fn test_change_password_after_match() {
        let seq = Sequencer::new();
        let mut inbound = check_exchange(0xFC);
        inbound.extend_from_slice(&[READY, DONE, READY, READY, DONE, READY, READY, 0xFC]);
        let mut n = node(&seq, &inbound, "-12345=54321=54321=");

        assert_eq!(
            n.step().unwrap(),
            (MenuChoice::ChangePassword, AttemptResult::Granted)
        );
        assert!(n.channel().link().is_drained());
    }

    #[test]
    fn test_two_mismatches_then_match_resets_counter() {
        let seq = Sequencer::new();
        let mut inbound = check_exchange(0xFB);
        inbound.extend(check_exchange(0xFB));
        inbound.extend(check_exchange(0xFC));
        inbound.extend_from_slice(&[READY, DONE, READY]);
        let mut n = node(&seq, &inbound, "+00000=11111=12345=");

        assert_eq!(
            n.step().unwrap(),
            (MenuChoice::OpenDoor, AttemptResult::Granted)
        );
        assert_eq!(n.attempts().count(), 0);
        assert!(!n.display().contains(MSG_ALERT));
    }

    #[test]
    fn test_third_mismatch_raises_alarm() {
        let seq = Sequencer::new();
        let mut inbound = Vec::new();
        for _ in 0..3 {
            inbound.extend(check_exchange(0xFB));
        }
        inbound.extend_from_slice(&[READY, DONE, READY]); // WRONG_PASSWORD + rendezvous
        let mut n = node(&seq, &inbound, "+00000=00000=00000=");

        assert_eq!(
            n.step().unwrap(),
            (MenuChoice::OpenDoor, AttemptResult::LockedOut)
        );

        let sent = n.channel().link().sent();
        assert_eq!(&sent[sent.len() - 3..], &[READY, 0xF6, READY]);
        assert_eq!(sent.iter().filter(|&&b| b == 0xF7).count(), 3);
        assert!(n.display().contains(MSG_ALERT));
        assert_eq!(n.timer().ticks_delivered(), 60);
        assert_eq!(n.attempts().count(), 0);
    }

    #[test]
    fn test_unexpected_reply_reprompts_without_counting() {
        let seq = Sequencer::new();
        let mut inbound = check_exchange(0x42);
        inbound.extend(check_exchange(0xFC));
        inbound.extend_from_slice(&[READY, DONE, READY]);
        let mut n = node(&seq, &inbound, "+12345=12345=");

        assert_eq!(
            n.step().unwrap(),
            (MenuChoice::OpenDoor, AttemptResult::Granted)
        );
        assert_eq!(n.attempts().count(), 0);
    }

    #[test]
    fn test_silent_peer_times_out() {
        let seq = Sequencer::new();
        let mut n = node(&seq, &[], "");
        assert_eq!(n.boot(), Err(NodeError::Channel(ChannelError::Timeout)));
    }
}
