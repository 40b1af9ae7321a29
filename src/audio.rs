use crate::assets;
use crate::core::{layout, AssetId, EffectCommand, AUDIO_VOLUME};
use crate::dom::{self, js_err};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Decoded tracks routed through one gain node; at most one source plays.
pub struct TrackPlayer {
    ctx: web::AudioContext,
    gain: web::GainNode,
    buffers: Vec<Option<web::AudioBuffer>>,
    current: Option<(usize, web::AudioBufferSourceNode)>,
}

impl TrackPlayer {
    pub fn new(ctx: web::AudioContext, track_count: usize) -> anyhow::Result<Self> {
        let gain = web::GainNode::new(&ctx).map_err(js_err)?;
        gain.gain().set_value(AUDIO_VOLUME);
        _ = gain.connect_with_audio_node(&ctx.destination());
        Ok(Self {
            ctx,
            gain,
            buffers: vec![None; track_count],
            current: None,
        })
    }

    pub fn context(&self) -> &web::AudioContext {
        &self.ctx
    }

    pub fn set_buffer(&mut self, track: usize, buffer: web::AudioBuffer) {
        if let Some(slot) = self.buffers.get_mut(track) {
            *slot = Some(buffer);
        }
    }

    /// Execute an audio command; colour commands are not ours and are ignored.
    pub fn apply(&mut self, command: &EffectCommand) {
        match *command {
            EffectCommand::StopTrack(track) => self.stop(track),
            EffectCommand::StartTrack(track) => self.start(track),
            EffectCommand::PauseAudio => {
                _ = self.ctx.suspend();
            }
            EffectCommand::ResumeAudio => {
                _ = self.ctx.resume();
            }
            EffectCommand::SetTubeColor(_) | EffectCommand::SetBackgroundColor(_) => {}
        }
    }

    #[allow(deprecated)]
    fn start(&mut self, track: usize) {
        let Some(Some(buffer)) = self.buffers.get(track) else {
            log::warn!("[audio] track {} has no decoded buffer", track);
            return;
        };
        // entering a segment always plays, even after a pause
        _ = self.ctx.resume();
        let src = match self.ctx.create_buffer_source() {
            Ok(s) => s,
            Err(e) => {
                log::error!("[audio] AudioBufferSourceNode error: {:?}", e);
                return;
            }
        };
        src.set_buffer(Some(buffer));
        src.set_loop(false);
        _ = src.connect_with_audio_node(&self.gain);
        if let Err(e) = src.start() {
            log::error!("[audio] start error: {:?}", e);
            return;
        }
        self.current = Some((track, src));
    }

    #[allow(deprecated)]
    fn stop(&mut self, track: usize) {
        if let Some((playing, src)) = self.current.take() {
            if playing != track {
                log::debug!("[audio] stopping track {} (asked for {})", playing, track);
            }
            _ = src.stop();
            _ = src.disconnect();
        }
    }
}

async fn decode_track(ctx: &web::AudioContext, url: &str) -> anyhow::Result<web::AudioBuffer> {
    let resp = dom::fetch_ok(url).await?;
    let bytes = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let bytes: js_sys::ArrayBuffer = bytes.dyn_into().map_err(js_err)?;
    let decoded = JsFuture::from(ctx.decode_audio_data(&bytes).map_err(js_err)?)
        .await
        .map_err(js_err)?;
    decoded.dyn_into::<web::AudioBuffer>().map_err(js_err)
}

/// Fetch and decode every track in the background.
pub fn load_tracks(player: Rc<RefCell<TrackPlayer>>, registry: assets::SharedRegistry, count: usize) {
    for track in 0..count {
        let player = player.clone();
        let registry = registry.clone();
        spawn_local(async move {
            let id = AssetId::audio(track);
            let url = layout::audio_url(track);
            let ctx = player.borrow().context().clone();
            match decode_track(&ctx, &url).await {
                Ok(buffer) => {
                    player.borrow_mut().set_buffer(track, buffer);
                    assets::settle(&registry, id, Ok(()));
                }
                Err(e) => assets::settle(&registry, id, Err(e.to_string())),
            }
        });
    }
}
