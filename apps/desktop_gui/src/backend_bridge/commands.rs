//! Backend commands queued from UI to backend worker.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    LoadCommandLog,
    SetVoiceListening(bool),
    SetGestureDetection(bool),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadCommandLog => "load_command_log",
            Self::SetVoiceListening(_) => "set_voice_listening",
            Self::SetGestureDetection(_) => "set_gesture_detection",
        }
    }
}
