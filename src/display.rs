//! The Christmas tree display module.
//!
//! Owns the panel, the backlight line, the random source and all animation
//! state. The host calls [`TreeDisplay::poll`] (or [`HostModule::tick`]) from
//! its main loop; every call does bounded work and returns.

use core::convert::Infallible;
use core::fmt;

use embassy_time::Instant;
use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget};
use embedded_hal::digital::{ErrorType, OutputPin};
use rand::RngCore;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{LightColors, palette, to_rgb565};
use crate::config::{StoredConfig, TreeDisplayConfig};
use crate::frame_scheduler::RedrawScheduler;
use crate::host::{Host, HostModule, PinConflict, StatusSummary};
use crate::scene::{FrameState, InfoPanel, LOADING_TEXT, READY_TEXT, Scene, draw_message};
use crate::status::StatusMirror;

/// Module id reported to the host.
pub const MODULE_ID: u16 = 98;

/// Control lines of the panel: RST, CS, DC, WR, RD and backlight.
///
/// The data lines are shared with PSRAM and are not claimed.
pub const CONTROL_PINS: [u8; 6] = [5, 6, 7, 8, 9, 38];

const DECEMBER: u8 = 12;

/// Failure while drawing or driving the backlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<DE, PE> {
    Draw(DE),
    Backlight(PE),
}

impl<DE, PE> fmt::Display for Error<DE, PE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draw(_) => f.write_str("drawing failed"),
            Self::Backlight(_) => f.write_str("backlight control failed"),
        }
    }
}

type DeviceError<D, B> = Error<<D as DrawTarget>::Error, <B as ErrorType>::Error>;

/// Failure while bringing the display up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError<DE, PE> {
    /// A control pin is taken; the module is disabled for the session
    PinConflict(PinConflict),
    Device(Error<DE, PE>),
}

impl<DE, PE> From<Error<DE, PE>> for SetupError<DE, PE> {
    fn from(error: Error<DE, PE>) -> Self {
        Self::Device(error)
    }
}

impl<DE, PE> fmt::Display for SetupError<DE, PE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinConflict(conflict) => conflict.fmt(f),
            Self::Device(error) => error.fmt(f),
        }
    }
}

/// What a tick ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Disabled, not connected or not set up
    Inactive,
    /// No threshold crossed, nothing drawn
    Idle,
    /// Date gate active, the ready message was drawn
    ReadyMessage,
    /// Full repaint of the current mode
    Repainted,
}

/// Backlight for boards without a controllable backlight line
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBacklight;

impl ErrorType for NoBacklight {
    type Error = Infallible;
}

impl OutputPin for NoBacklight {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Animated tree and status display
pub struct TreeDisplay<D, B, R> {
    // External dependencies and configuration
    display: D,
    backlight: Option<B>,
    rng: R,
    config: TreeDisplayConfig,

    // Internal state
    scene: Scene,
    scheduler: RedrawScheduler,
    mirror: StatusMirror,
    display_ready: bool,
}

impl<D, B, R> TreeDisplay<D, B, R>
where
    D: DrawTarget<Color = Rgb565>,
    B: OutputPin,
    R: RngCore,
{
    /// Create the module; nothing touches the hardware until [`Self::start`]
    pub fn new(display: D, backlight: Option<B>, rng: R, config: TreeDisplayConfig) -> Self {
        let size = display.bounding_box().size;
        Self {
            display,
            backlight,
            rng,
            config,
            scene: Scene::new(size),
            scheduler: RedrawScheduler::new(),
            mirror: StatusMirror::new(),
            display_ready: false,
        }
    }

    /// Claim the control pins and show the loading screen
    ///
    /// Does nothing while disabled. A pin conflict disables the module for
    /// the rest of the session.
    pub fn start<H: Host>(&mut self, host: &mut H) -> Result<(), SetupError<D::Error, B::Error>> {
        if !self.config.enabled {
            return Ok(());
        }

        if let Err(conflict) = host.allocate_pins(&CONTROL_PINS) {
            #[cfg(feature = "esp32-log")]
            println!("[TreeDisplay.start] {}, display disabled", conflict);
            self.config.enabled = false;
            return Err(SetupError::PinConflict(conflict));
        }

        self.set_backlight(true)?;
        self.scene.seed(&mut self.rng);
        self.show_message(LOADING_TEXT)?;
        self.display_ready = true;

        #[cfg(feature = "esp32-log")]
        println!("[TreeDisplay.start] display ready");
        Ok(())
    }

    /// Run one scheduler step
    pub fn poll<H: Host>(
        &mut self,
        host: &H,
        now: Instant,
    ) -> Result<TickOutcome, DeviceError<D, B>> {
        if !self.config.enabled || !self.display_ready || !host.is_connected() {
            return Ok(TickOutcome::Inactive);
        }

        if !self.tree_in_season(host) {
            if !self.scheduler.poll_due(now) {
                return Ok(TickOutcome::Idle);
            }
            self.show_message(READY_TEXT)?;
            return Ok(TickOutcome::ReadyMessage);
        }

        // Any access wakes the display
        if self.scheduler.wake() {
            self.set_backlight(true)?;
        }

        let speed = self.config.animation_speed();
        if self.scheduler.animation_step(now, speed) {
            self.scene.animate(speed, &mut self.rng);
        }

        if !self.scheduler.poll_due(now) {
            return Ok(TickOutcome::Idle);
        }

        if self
            .scheduler
            .backlight_expired(now, self.config.backlight_timeout())
        {
            self.set_backlight(false)?;
            self.scheduler.mark_backlight_off();
        }

        let status = host.status();
        if self.mirror.has_changed(&status) {
            self.scheduler.request_redraw();
        }
        if !self.scheduler.begin_redraw(now) {
            return Ok(TickOutcome::Idle);
        }

        if self.scheduler.wake() {
            self.set_backlight(true)?;
        }

        let state = FrameState {
            frame: self.scheduler.frame(),
            colors: LightColors {
                scheme: self.config.color_scheme,
                hue: self.scheduler.hue(),
                live_color: host.primary_color(),
            },
        };
        let info = InfoPanel {
            ssid: &status.ssid,
            ip: status.ip,
            brightness: status.brightness,
            signal_quality: host.signal_quality(host.rssi()),
            effect_name: host.effect_name(status.mode),
        };
        self.scene
            .render(
                &mut self.display,
                self.config.display_mode,
                &state,
                &info,
                &mut self.rng,
            )
            .map_err(DeviceError::<D, B>::Draw)?;

        self.mirror.update(status);
        Ok(TickOutcome::Repainted)
    }

    /// Check the December-only gate
    fn tree_in_season<H: Host>(&self, host: &H) -> bool {
        !self.config.show_in_december_only || host.month() == Some(DECEMBER)
    }

    /// Replace the screen content with a single status line
    fn show_message(&mut self, text: &str) -> Result<(), DeviceError<D, B>> {
        self.display
            .clear(to_rgb565(palette::BLACK))
            .and_then(|()| draw_message(&mut self.display, text))
            .map_err(DeviceError::<D, B>::Draw)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DeviceError<D, B>> {
        let Some(pin) = self.backlight.as_mut() else {
            return Ok(());
        };
        #[cfg(feature = "esp32-log")]
        println!("[TreeDisplay.set_backlight] backlight {}", if on { "on" } else { "off" });
        let result = if on { pin.set_high() } else { pin.set_low() };
        result.map_err(DeviceError::<D, B>::Backlight)
    }

    pub fn config(&self) -> &TreeDisplayConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    pub fn mirror(&self) -> &StatusMirror {
        &self.mirror
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Check if setup completed and the panel may be drawn on
    pub const fn is_ready(&self) -> bool {
        self.display_ready
    }
}

impl<H, D, B, R> HostModule<H> for TreeDisplay<D, B, R>
where
    H: Host,
    D: DrawTarget<Color = Rgb565>,
    B: OutputPin,
    R: RngCore,
{
    fn setup(&mut self, host: &mut H) {
        // Failures leave the module disabled or not ready
        if let Err(_error) = self.start(host) {
            #[cfg(feature = "esp32-log")]
            println!("[TreeDisplay.setup] {}", _error);
        }
    }

    fn tick(&mut self, host: &H, now: Instant) {
        if let Err(_error) = self.poll(host, now) {
            #[cfg(feature = "esp32-log")]
            println!("[TreeDisplay.tick] {}", _error);
        }
    }

    fn serialize_config(&self) -> StoredConfig {
        self.config.to_stored()
    }

    fn deserialize_config(&mut self, stored: Option<&StoredConfig>) -> bool {
        match stored {
            Some(stored) => self.config.load(stored),
            None => true,
        }
    }

    fn describe_status(&self) -> StatusSummary {
        StatusSummary::new(self.config.enabled, self.config.display_mode)
    }

    fn id(&self) -> u16 {
        MODULE_ID
    }
}
