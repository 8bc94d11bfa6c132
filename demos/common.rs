//! Shared utilities for demos.
//!
//! Provides common functionality used across all demos:
//! - Command-line argument parsing
//! - Logging initialization
//! - Sample components document

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

// ============================================================================
// Sample Data
// ============================================================================

/// Components document shaped like the collector's output.
pub const SAMPLE_COMPONENTS: &str = r#"{
  "audio": { "value": 124.04347527516074, "duration": 6 },
  "canvas": {
    "value": {
      "winding": true,
      "geometry": "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAHoAAABuCAYAAAD",
      "text": "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAPoAAAAeCAYAAAD"
    },
    "duration": 14
  },
  "webGlBasics": {
    "value": {
      "version": "WebGL 1.0 (OpenGL ES 2.0 Chromium)",
      "vendor": "WebKit",
      "vendorUnmasked": "Google Inc. (Intel)",
      "renderer": "WebKit WebGL",
      "rendererUnmasked": "ANGLE (Intel, Mesa Intel(R) UHD Graphics 620 (KBL GT2), OpenGL 4.6)",
      "shadingLanguageVersion": "WebGL GLSL ES 1.0 (OpenGL ES GLSL ES 1.0 Chromium)"
    },
    "duration": 3
  },
  "webGlExtensions": {
    "value": {
      "contextAttributes": ["stencil=false", "alpha=true", "depth=true", "antialias=true"],
      "shaderPrecisions": ["VERTEX_SHADER.HIGH_FLOAT=127,127,23", "FRAGMENT_SHADER.LOW_INT=31,30,0"],
      "extensionParameters": ["MAX_TEXTURE_MAX_ANISOTROPY_EXT=16"]
    },
    "duration": 5
  },
  "math": {
    "value": {
      "acos": 1.4473588658278522,
      "acosh": 709.889355822726,
      "asinh": 0.881373587019543,
      "atanh": 0.5493061443340548,
      "cosh": 1.5430806348152437,
      "exp": 2.718281828459045,
      "log1p": 2.3978952727983707,
      "sin": 0.8178819121159085,
      "tan": -1.4214488238747245
    },
    "duration": 0
  },
  "fonts": { "value": ["Arial", "Courier New"], "duration": 40 }
}"#;

// ============================================================================
// Types
// ============================================================================

/// Command-line arguments for demos.
#[derive(Debug, Clone)]
pub struct Args {
    pub debug: bool,
    pub components: Option<PathBuf>,
}

impl Args {
    /// Parse command-line arguments.
    ///
    /// The first non-flag argument is a components file path.
    pub fn parse() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self {
            debug: args.iter().any(|a| a == "--debug"),
            components: args
                .iter()
                .find(|a| !a.starts_with("--"))
                .map(PathBuf::from),
        }
    }

    /// Reads the components document, or the built-in sample.
    pub fn components_json(&self) -> std::io::Result<String> {
        match &self.components {
            Some(path) => std::fs::read_to_string(path),
            None => Ok(SAMPLE_COMPONENTS.to_string()),
        }
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Initialize tracing/logging.
pub fn init_logging(debug: bool) {
    let filter = if debug {
        "fingerprint_digest=trace"
    } else {
        "fingerprint_digest=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}
