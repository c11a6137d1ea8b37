use dash_core::{AudioBackend, AudioError, LoopHandle, ScheduledTone, Waveform};
use web_sys as web;

fn node_err(node: &'static str) -> impl Fn(wasm_bindgen::JsValue) -> AudioError {
    move |e| {
        log::error!("{} error: {:?}", node, e);
        AudioError::NodeCreation {
            node,
            reason: format!("{:?}", e),
        }
    }
}

fn oscillator_type(waveform: Waveform) -> web::OscillatorType {
    match waveform {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Square => web::OscillatorType::Square,
        Waveform::Saw => web::OscillatorType::Sawtooth,
        Waveform::Triangle => web::OscillatorType::Triangle,
    }
}

/// WebAudio implementation of the audio capability.
pub struct WebAudio {
    ctx: web::AudioContext,
    loops: Vec<(LoopHandle, web::AudioBufferSourceNode)>,
    next_loop: u32,
}

impl WebAudio {
    /// `None` when the browser has no Web Audio API.
    pub fn new() -> Option<Self> {
        match web::AudioContext::new() {
            Ok(ctx) => {
                _ = ctx.resume();
                Some(Self {
                    ctx,
                    loops: Vec::new(),
                    next_loop: 0,
                })
            }
            Err(e) => {
                log::warn!("Web Audio API not supported: {:?}", e);
                None
            }
        }
    }

    /// Browsers start contexts suspended until a user gesture.
    pub fn resume(&self) {
        _ = self.ctx.resume();
    }
}

impl AudioBackend for WebAudio {
    fn current_time(&self) -> f64 {
        self.ctx.current_time()
    }

    fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate()
    }

    // oscillator -> low-pass -> gain -> destination, gain ramped exponentially to the floor
    fn play_tone(&mut self, tone: &ScheduledTone) -> Result<(), AudioError> {
        // silent voice; exponential ramps also need a strictly positive start
        if tone.peak_gain <= 0.0 {
            return Ok(());
        }
        let src = web::OscillatorNode::new(&self.ctx).map_err(node_err("OscillatorNode"))?;
        src.set_type(oscillator_type(tone.waveform));
        src.frequency().set_value(tone.frequency_hz);

        let filter = web::BiquadFilterNode::new(&self.ctx).map_err(node_err("BiquadFilterNode"))?;
        filter.set_type(web::BiquadFilterType::Lowpass);
        filter.frequency().set_value(tone.cutoff_hz);

        let gain = web::GainNode::new(&self.ctx).map_err(node_err("GainNode"))?;
        let schedule = |e: wasm_bindgen::JsValue| AudioError::Schedule(format!("{:?}", e));
        gain.gain()
            .set_value_at_time(tone.peak_gain, tone.start_sec)
            .map_err(schedule)?;
        gain.gain()
            .exponential_ramp_to_value_at_time(tone.floor_gain, tone.stop_sec())
            .map_err(schedule)?;

        _ = src.connect_with_audio_node(&filter);
        _ = filter.connect_with_audio_node(&gain);
        _ = gain.connect_with_audio_node(&self.ctx.destination());
        src.start_with_when(tone.start_sec).map_err(schedule)?;
        src.stop_with_when(tone.stop_sec()).map_err(schedule)?;
        Ok(())
    }

    fn start_noise_loop(
        &mut self,
        samples: &[f32],
        sample_rate: f32,
    ) -> Result<LoopHandle, AudioError> {
        let buffer = self
            .ctx
            .create_buffer(1, samples.len() as u32, sample_rate)
            .map_err(node_err("AudioBuffer"))?;
        let mut data = samples.to_vec();
        _ = buffer.copy_to_channel(&mut data, 0);

        let source = self
            .ctx
            .create_buffer_source()
            .map_err(node_err("AudioBufferSourceNode"))?;
        source.set_buffer(Some(&buffer));
        source.set_loop(true);
        _ = source.connect_with_audio_node(&self.ctx.destination());
        #[allow(deprecated)]
        source
            .start()
            .map_err(|e| AudioError::Schedule(format!("{:?}", e)))?;

        let handle = LoopHandle(self.next_loop);
        self.next_loop = self.next_loop.wrapping_add(1);
        self.loops.push((handle, source));
        Ok(handle)
    }

    fn stop_loop(&mut self, handle: LoopHandle) -> Result<(), AudioError> {
        let idx = self
            .loops
            .iter()
            .position(|(h, _)| *h == handle)
            .ok_or(AudioError::UnknownLoop(handle.0))?;
        let (_, source) = self.loops.swap_remove(idx);
        #[allow(deprecated)]
        source
            .stop()
            .map_err(|e| AudioError::Schedule(format!("{:?}", e)))?;
        _ = source.disconnect();
        Ok(())
    }
}
