//! Voice pipeline description handed to the hosted session driver

use serde::Serialize;
use voice_agent_core::agent::Tool;
use voice_agent_tools::ToolRegistry;

/// Default agent instructions
pub const DEFAULT_INSTRUCTIONS: &str = "You are a friendly voice assistant. Keep answers short \
    and conversational. Use the available tools for weather, web search, translation, \
    encyclopedia lookups, jokes and arithmetic, and relay their answers in your own words.";

/// Greeting instructions for the first turn of a session
pub const DEFAULT_GREETING: &str = "Greet the user and offer your assistance.";

/// Hosted speech/language services the session should use
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PipelineConfig {
    /// Speech-to-text model (provider/model)
    pub stt_model: String,
    /// Speech-to-text language (`multi` for automatic detection)
    pub stt_language: String,
    /// Language model (provider/model)
    pub llm_model: String,
    /// Text-to-speech model (provider/model)
    pub tts_model: String,
    /// Text-to-speech voice id
    pub tts_voice: String,
    /// Voice-activity detector
    pub vad: String,
    /// Turn detection model
    pub turn_detection: String,
    /// Noise cancellation filter
    pub noise_cancellation: String,
    /// Whether the session accepts video input
    pub video_enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stt_model: "deepgram/nova-3".to_string(),
            stt_language: "multi".to_string(),
            llm_model: "google/gemini-1.5-flash".to_string(),
            tts_model: "cartesia/sonic-2".to_string(),
            tts_voice: "78ab82d5-25be-4f7d-82b3-7ad64e5b85b2".to_string(),
            vad: "silero".to_string(),
            turn_detection: "multilingual".to_string(),
            noise_cancellation: "BVC".to_string(),
            video_enabled: true,
        }
    }
}

impl PipelineConfig {
    /// Load overrides from `VOICE_AGENT_*` environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load overrides through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let pick = |key: &str, default: String| lookup(key).unwrap_or(default);

        Self {
            stt_model: pick("VOICE_AGENT_STT_MODEL", defaults.stt_model),
            stt_language: pick("VOICE_AGENT_STT_LANGUAGE", defaults.stt_language),
            llm_model: pick("VOICE_AGENT_LLM_MODEL", defaults.llm_model),
            tts_model: pick("VOICE_AGENT_TTS_MODEL", defaults.tts_model),
            tts_voice: pick("VOICE_AGENT_TTS_VOICE", defaults.tts_voice),
            vad: pick("VOICE_AGENT_VAD", defaults.vad),
            turn_detection: pick("VOICE_AGENT_TURN_DETECTION", defaults.turn_detection),
            noise_cancellation: pick("VOICE_AGENT_NOISE_CANCELLATION", defaults.noise_cancellation),
            video_enabled: lookup("VOICE_AGENT_VIDEO_ENABLED")
                .map_or(defaults.video_enabled, |v| matches!(v.trim(), "1" | "true" | "yes")),
        }
    }
}

/// Everything the session driver needs to start a conversation
#[derive(Clone, Debug, Serialize)]
pub struct SessionSpec {
    /// Hosted services
    pub pipeline: PipelineConfig,
    /// System instructions for the language model
    pub instructions: String,
    /// Instructions for the opening reply
    pub greeting: String,
    /// Tool catalogue offered to the language model
    pub tools: Vec<Tool>,
}

impl SessionSpec {
    /// Describe a session over the given pipeline and registry
    #[must_use]
    pub fn new(pipeline: PipelineConfig, instructions: String, registry: &ToolRegistry) -> Self {
        Self {
            pipeline,
            instructions,
            greeting: DEFAULT_GREETING.to_string(),
            tools: registry.get_tools(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_defaults() {
        let config = PipelineConfig::from_lookup(|_| None);
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.stt_model, "deepgram/nova-3");
        assert!(config.video_enabled);
    }

    #[test]
    fn test_pipeline_overrides() {
        let config = PipelineConfig::from_lookup(|key| match key {
            "VOICE_AGENT_LLM_MODEL" => Some("openai/gpt-4o-mini".to_string()),
            "VOICE_AGENT_VIDEO_ENABLED" => Some("false".to_string()),
            _ => None,
        });
        assert_eq!(config.llm_model, "openai/gpt-4o-mini");
        assert!(!config.video_enabled);
        assert_eq!(config.tts_model, "cartesia/sonic-2");
    }

    #[test]
    fn test_session_spec_lists_tools() {
        let mut registry = ToolRegistry::new();
        let (tool, executor) = voice_agent_tools::calculation::calculate_tool();
        registry.register(tool, executor);

        let spec = SessionSpec::new(
            PipelineConfig::default(),
            DEFAULT_INSTRUCTIONS.to_string(),
            &registry,
        );
        assert_eq!(spec.tools.len(), 1);
        assert_eq!(spec.tools[0].name, "calculate");
    }
}
