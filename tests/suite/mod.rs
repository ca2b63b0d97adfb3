mod config_pipeline;
mod export;
mod playback;
