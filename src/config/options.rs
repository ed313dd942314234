// src/config/options.rs
use std::path::PathBuf;
use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub poll: PollOptions,
    pub render: RenderOptions,
    pub stage: Stage,
}

/// Which halves of the cycle to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Full,
    PollOnly,
    RenderOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollOptions {
    pub base_url: String,
    pub data_dir: PathBuf,
    pub page_stride: u32,
    pub max_pages: u32,
    pub timeout_secs: u64,
    /// Name history files `S9_t_deposito_acs.txt` instead of `S9.txt`.
    pub slug_names: bool,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            base_url: s!(DEFAULT_BASE_URL),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            page_stride: PAGE_STRIDE,
            max_pages: MAX_PAGES,
            timeout_secs: FETCH_TIMEOUT_SECS,
            slug_names: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaintRule {
    pub driver: String,
    pub cell: String,
    pub color: String,
    pub animate: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub template: PathBuf,
    pub output: PathBuf,
    /// Render tokens as "value units" instead of bare value.
    pub with_units: bool,
    pub paint_rules: Vec<PaintRule>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            template: PathBuf::from(DEFAULT_TEMPLATE_FILE),
            output: PathBuf::from(DEFAULT_RENDER_FILE),
            with_units: true,
            paint_rules: DEFAULT_PAINT_RULES
                .iter()
                .map(|(d, c, col, a)| PaintRule {
                    driver: s!(*d),
                    cell: s!(*c),
                    color: s!(*col),
                    animate: *a,
                })
                .collect(),
        }
    }
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            poll: PollOptions::default(),
            render: RenderOptions::default(),
            stage: Stage::Full,
        }
    }
}
