// er301-rs/er301/src/reader/mod.rs

//! Card read engine: bring-up, detection, per-sector authentication,
//! block reads and the final digest, reported through a [`ReadCallback`].

/// Host callback trait
pub mod callback;
/// Cooperative cancellation
pub mod cancel;
/// Engine states
pub mod state;

pub use callback::ReadCallback;
pub use cancel::CancelToken;
pub use state::ReaderState;

use log::{debug, info, warn};

use crate::card::addressing::{is_trailer, sector_of};
use crate::card::trailer::substitute_trailer_keys;
use crate::card::{Card, CardReadout, CardSession, SectorAuth};
use crate::config::ReaderConfig;
use crate::device::{Device, DeviceBuilder, Initialized};
use crate::transport::Transport;
use crate::types::{AuthMode, BeepDuration, CardType, LedColor, RequestCode};
use crate::utils::pause;
use crate::{Error, Result};

/// How one detection + read cycle ended.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Every block was read and the digest delivered
    Completed(CardReadout),
    /// The cycle ended early; the error was reported
    Failed(Error),
    /// The cancel token was set; no error callback was fired.
    Cancelled,
}

/// Drives an initialized ER301 through card read cycles.
///
/// The transport is owned for the engine's lifetime and closed when the
/// reader is dropped.
pub struct MifareReader<C: ReadCallback> {
    device: Device<Initialized>,
    callback: C,
    cancel: CancelToken,
    state: ReaderState,
    device_name: String,
}

impl<C: ReadCallback> MifareReader<C> {
    /// Initialize the reader behind `transport`, report its name and flash
    /// the blue LED. Failures are reported to the callback and returned.
    pub fn open(transport: Box<dyn Transport>, mut callback: C, config: ReaderConfig) -> Result<Self> {
        let port = transport.name();
        let led_pause = config.led_pause;
        let device = DeviceBuilder::new()
            .with_transport(transport)
            .with_config(config)
            .build_uninitialized()
            .and_then(|d| d.initialize());
        let mut device = match device {
            Ok(d) => d,
            Err(err) => {
                callback.on_status(&format!(
                    "Error during initialization of hardware on {}: {}",
                    port, err
                ));
                callback.on_error();
                return Err(err);
            }
        };
        callback.on_status("Successful initialization of hardware");

        let announced = device.read_device_mode().and_then(|name| {
            device.set_led(LedColor::Blue)?;
            pause(led_pause);
            device.set_led(LedColor::Off)?;
            Ok(name)
        });
        let device_name = match announced {
            Ok(name) => name,
            Err(err) => {
                callback.on_status(&format!("Error while querying reader on {}: {}", port, err));
                callback.on_error();
                return Err(err);
            }
        };
        info!("connected to {} on {}", device_name, port);
        callback.on_status(&format!("Connected to {} hardware", device_name));

        Ok(Self {
            device,
            callback,
            cancel: CancelToken::new(),
            state: ReaderState::Initialized,
            device_name,
        })
    }

    /// Open the serial port `path` and then [`MifareReader::open`] it.
    #[cfg(feature = "serial")]
    pub fn open_port(
        path: &str,
        settings: &crate::transport::SerialSettings,
        mut callback: C,
        config: ReaderConfig,
    ) -> Result<Self> {
        let transport = match crate::transport::SerialTransport::open(path, settings) {
            Ok(t) => t,
            Err(err) => {
                callback.on_status(&format!("Error while trying to open port {}: {}", path, err));
                callback.on_error();
                return Err(Error::Connection(format!("cannot open {}: {}", path, err)));
            }
        };
        callback.on_status(&format!("Successfully opened port {}", path));
        Self::open(Box::new(transport), callback, config)
    }

    /// Current engine state
    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Name reported by the reader during bring-up
    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Token that stops the engine at the next exchange boundary
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The host callback
    pub fn callback(&self) -> &C {
        &self.callback
    }

    /// The host callback, mutably
    pub fn callback_mut(&mut self) -> &mut C {
        &mut self.callback
    }

    /// Direct access to the device for operations outside the read cycle
    pub fn device_mut(&mut self) -> &mut Device<Initialized> {
        &mut self.device
    }

    /// Drop the engine, closing the transport, and hand back the callback
    pub fn into_callback(self) -> C {
        self.callback
    }

    /// Wait for a card, read it completely and report the result.
    pub fn run_once(&mut self) -> CycleOutcome {
        match self.cycle() {
            Ok(readout) => {
                self.state = ReaderState::Success;
                CycleOutcome::Completed(readout)
            }
            Err(Error::Cancelled) => {
                info!("read cycle cancelled");
                self.callback.on_status("Reading of card interrupted by user!");
                self.state = ReaderState::Detecting;
                CycleOutcome::Cancelled
            }
            Err(err) => {
                self.fail(&err);
                CycleOutcome::Failed(err)
            }
        }
    }

    /// Repeat read cycles until cancelled. Only a connection error ends
    /// the loop with an error.
    ///
    /// With [`RequestCode::AllTypeA`] a halted card that stays in the field
    /// is read again; loop with [`RequestCode::IdleCard`] to skip it.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.run_once() {
                CycleOutcome::Cancelled => return Ok(()),
                CycleOutcome::Failed(err) if err.is_fatal() => return Err(err),
                CycleOutcome::Completed(_) | CycleOutcome::Failed(_) => {}
            }
        }
    }

    fn cycle(&mut self) -> Result<CardReadout> {
        let card_type = self.detect()?;
        let card = self.activate(card_type)?;
        self.read_card(card)
    }

    fn detect(&mut self) -> Result<CardType> {
        self.state = ReaderState::Detecting;
        self.callback.on_status("Waiting for card...");
        let code = self.device.config().request_code;
        let interval = self.device.config().detect_interval;
        loop {
            if self.cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            if let Some(card_type) = self.device.request(code)? {
                info!("card detected: {}", card_type);
                return Ok(card_type);
            }
            pause(interval);
        }
    }

    fn activate(&mut self, card_type: CardType) -> Result<Card> {
        self.state = ReaderState::CardPresent;
        self.device.set_led(LedColor::Blue)?;
        let serial = self.device.anticollision()?;
        debug!("anticollision: serial {} (wire {:#010x})", serial, serial.wire());
        let sak = self.device.select(serial)?;
        self.state = ReaderState::Selected;
        debug!("card {} selected", serial);
        Ok(Card::new(serial, card_type, sak))
    }

    fn read_card(&mut self, card: Card) -> Result<CardReadout> {
        let use_a = self.callback.use_key_a();
        let use_b = self.callback.use_key_b();
        if !use_a && !use_b {
            return Err(Error::NoAuthMode);
        }
        let include_keys = self.callback.include_keys();

        self.callback.on_status(&format!(
            "Reading card {} with serial no. {}",
            card.card_type(),
            card.serial()
        ));

        let mut session = CardSession::new(card);
        for block in 0..card.block_count() {
            if self.cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let sector = sector_of(block);
            if session.needs_auth(sector) {
                let auth = self.authorize(block, sector, use_a, use_b)?;
                session.set_authorized(auth);
            }

            self.state = ReaderState::ReadingBlock(block);
            let mut data = self.device.read_block(block as u8)?;
            if include_keys && is_trailer(block) {
                if let Some(auth) = session.authorized() {
                    substitute_trailer_keys(&mut data, auth.key_a.as_ref(), auth.key_b.as_ref());
                }
            }
            debug!("block {:3}: {}", block, data.to_hex());

            self.callback.on_block_read(block, &data);
            session.store_block(block, &data)?;
        }

        Ok(self.finish(session))
    }

    /// Authenticate every enabled key slot for `sector`, fetching fresh
    /// keys from the host.
    fn authorize(&mut self, block: usize, sector: usize, use_a: bool, use_b: bool) -> Result<SectorAuth> {
        self.state = ReaderState::Authorizing(sector);
        let mut auth = SectorAuth {
            sector,
            key_a: None,
            key_b: None,
        };

        for (mode, enabled) in [(AuthMode::KeyA, use_a), (AuthMode::KeyB, use_b)] {
            if !enabled {
                continue;
            }
            let key = match mode {
                AuthMode::KeyA => self.callback.key_a(sector)?,
                AuthMode::KeyB => self.callback.key_b(sector)?,
            };
            if let Err(err) = self.device.authenticate(mode, block as u8, &key) {
                if matches!(err, Error::Auth { .. }) {
                    // 認証失敗後はリーダの状態を戻しておく
                    if let Err(e) = self.device.request(RequestCode::IdleCard) {
                        warn!("idle request after auth failure failed: {}", e);
                    }
                }
                return Err(err);
            }
            debug!("sector {} authorized with {}", sector, mode);
            match mode {
                AuthMode::KeyA => auth.key_a = Some(key),
                AuthMode::KeyB => auth.key_b = Some(key),
            }
        }
        Ok(auth)
    }

    /// Halt, acknowledge, digest. A failed halt is reported but the digest
    /// is still delivered.
    fn finish(&mut self, session: CardSession) -> CardReadout {
        self.state = ReaderState::Halted;
        let halted = match self.device.halt() {
            Ok(()) => {
                if let Err(e) = self.device.beep(BeepDuration::Short) {
                    warn!("beep after halt failed: {}", e);
                }
                if let Err(e) = self.device.set_led(LedColor::Off) {
                    warn!("led off after halt failed: {}", e);
                }
                self.callback.on_status(&format!(
                    "Card read in {:.3} sec.",
                    session.elapsed().as_secs_f64()
                ));
                true
            }
            Err(err) => {
                warn!("halt failed: {}", err);
                self.callback.on_status(&format!("Halt failed: {}", err));
                false
            }
        };

        let readout = CardReadout::new(
            session.card(),
            session.digest_hex(),
            session.elapsed(),
            halted,
        );
        info!(
            "card {} read, digest {}",
            readout.serial, readout.digest
        );
        self.callback.on_success(readout.serial, &readout.digest);
        readout
    }

    fn fail(&mut self, err: &Error) {
        warn!("read cycle failed: {}", err);
        self.state = ReaderState::Failed;
        self.callback.on_status(&err.to_string());
        self.callback.on_error();
        self.alarm();
        self.state = ReaderState::Detecting;
    }

    /// Red LED and a long beep. Failures here are only logged.
    fn alarm(&mut self) {
        let alarm_pause = self.device.config().alarm_pause;
        if let Err(e) = self.device.set_led(LedColor::Red) {
            warn!("alarm led failed: {}", e);
        }
        if let Err(e) = self.device.beep(BeepDuration::Long) {
            warn!("alarm beep failed: {}", e);
        }
        pause(alarm_pause);
        if let Err(e) = self.device.set_led(LedColor::Off) {
            warn!("alarm led off failed: {}", e);
        }
    }
}
