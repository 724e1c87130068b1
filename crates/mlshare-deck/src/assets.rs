#![forbid(unsafe_code)]

//! Bundled image assets.
//!
//! Images are opaque: the page only knows each one by a stable name, the file
//! it ships as, and its alt text. The terminal view draws a framed placeholder;
//! the HTML export emits an `<img>` pointing at [`Asset::path`].

use std::fmt;

/// Every image the page references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    NeuralNetwork,
    CnnArchitecture,
    Transformer,
    RagArchitecture,
    AgentArchitecture,
    MlPipeline,
}

impl Asset {
    pub const ALL: [Asset; 6] = [
        Asset::NeuralNetwork,
        Asset::CnnArchitecture,
        Asset::Transformer,
        Asset::RagArchitecture,
        Asset::AgentArchitecture,
        Asset::MlPipeline,
    ];

    /// Stable reference name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NeuralNetwork => "neural_network",
            Self::CnnArchitecture => "cnn_architecture",
            Self::Transformer => "transformer",
            Self::RagArchitecture => "rag_architecture",
            Self::AgentArchitecture => "agent_architecture",
            Self::MlPipeline => "ml_pipeline",
        }
    }

    /// Bundled file name.
    #[must_use]
    pub const fn file(self) -> &'static str {
        match self {
            Self::NeuralNetwork => "MrJshSJncYR7.jpg",
            Self::CnnArchitecture => "NjklcU11uR4d.jpeg",
            Self::Transformer => "dKwL1PIxQDRs.png",
            Self::RagArchitecture => "iQVVBnYOkjFz.jpg",
            Self::AgentArchitecture => "yWIblKwRWKfr.png",
            Self::MlPipeline => "igTH644SVCGB.jpg",
        }
    }

    #[must_use]
    pub const fn alt(self) -> &'static str {
        match self {
            Self::NeuralNetwork => "Neural Network Architecture",
            Self::CnnArchitecture => "CNN Architecture",
            Self::Transformer => "Transformer Architecture",
            Self::RagArchitecture => "RAG Architecture",
            Self::AgentArchitecture => "AI Agent Architecture",
            Self::MlPipeline => "ML Pipeline",
        }
    }

    /// Path relative to the page root.
    #[must_use]
    pub fn path(self) -> String {
        format!("assets/{}", self.file())
    }

    /// Look up by stable name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for asset in Asset::ALL {
            assert_eq!(Asset::from_name(asset.name()), Some(asset));
        }
        assert_eq!(Asset::from_name("missing"), None);
    }

    #[test]
    fn files_are_distinct() {
        let mut files: Vec<_> = Asset::ALL.iter().map(|a| a.file()).collect();
        files.sort_unstable();
        files.dedup();
        assert_eq!(files.len(), Asset::ALL.len());
    }

    #[test]
    fn path_points_into_assets() {
        assert_eq!(Asset::Transformer.path(), "assets/dKwL1PIxQDRs.png");
    }
}
