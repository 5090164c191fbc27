//! Audio fallback using Web Audio API
//!
//! Devices without a vibration motor get a short procedurally generated
//! tone instead - no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::consts::{TONE_DURATION_MS, TONE_FREQUENCY_HZ};
use crate::platform::FeedbackPattern;

/// Beep player for feedback cues
pub struct ToneAudio {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for ToneAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneAudio {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - tone fallback disabled");
        }
        Self { ctx, volume: 1.0 }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play the tone for a feedback cue
    pub fn play(&self, pattern: FeedbackPattern) {
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match pattern {
            FeedbackPattern::Bite | FeedbackPattern::Reel => self.beep(ctx, TONE_DURATION_MS),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Sine beep that fades out over `duration_ms`
    fn beep(&self, ctx: &AudioContext, duration_ms: u32) {
        let Some((osc, gain)) = self.create_osc(ctx, TONE_FREQUENCY_HZ, OscillatorType::Sine)
        else {
            return;
        };
        let t = ctx.current_time();
        let end = t + duration_ms as f64 / 1000.0;

        gain.gain().set_value_at_time(self.volume, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.001, end).ok();

        osc.start().ok();
        osc.stop_with_when(end).ok();
    }
}
