use serde::Deserialize;

use super::object_type::{obj_deserialize, TypeAudioFeatures};

/// Audio features of a track, as analysed by Spotify.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioFeatures {
    id: String,
    danceability: f32,
    energy: f32,
    valence: f32,
    tempo: f32,
    key: i32,
    mode: u8,
    #[serde(default)]
    acousticness: f32,
    #[serde(default)]
    instrumentalness: f32,
    #[serde(default)]
    liveness: f32,
    #[serde(default)]
    loudness: f32,
    #[serde(default)]
    speechiness: f32,
    #[allow(dead_code)]
    #[serde(rename = "type", deserialize_with = "obj_deserialize")]
    item_type: TypeAudioFeatures,
}

/// The modality of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Major,
    Minor,
}

impl AudioFeatures {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn danceability(&self) -> f32 {
        self.danceability
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn valence(&self) -> f32 {
        self.valence
    }

    /// Estimated tempo in beats per minute.
    pub fn tempo(&self) -> f32 {
        self.tempo
    }

    /// The key the track is in, using standard pitch class notation. -1 if no key was detected.
    pub fn key(&self) -> i32 {
        self.key
    }

    pub fn mode(&self) -> Mode {
        if self.mode == 1 {
            Mode::Major
        } else {
            Mode::Minor
        }
    }

    pub fn acousticness(&self) -> f32 {
        self.acousticness
    }

    pub fn instrumentalness(&self) -> f32 {
        self.instrumentalness
    }

    pub fn liveness(&self) -> f32 {
        self.liveness
    }

    pub fn loudness(&self) -> f32 {
        self.loudness
    }

    pub fn speechiness(&self) -> f32 {
        self.speechiness
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Major => f.write_str("Major"),
            Mode::Minor => f.write_str("Minor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_mode() {
        let features: AudioFeatures = serde_json::from_str(
            r#"{
                "id": "0VjIjW4GlUZAMYd2vXMi3b",
                "type": "audio_features",
                "danceability": 0.514,
                "energy": 0.73,
                "valence": 0.334,
                "tempo": 171.005,
                "key": 1,
                "mode": 0
            }"#,
        )
        .unwrap();

        assert_eq!(features.mode(), Mode::Minor);
        assert_eq!(features.key(), 1);
    }
}
