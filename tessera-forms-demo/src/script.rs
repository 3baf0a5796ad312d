//! Gesture scripts replayed against the demo slider.
//!
//! A script is a whitespace or comma separated list of steps; positions are
//! client x coordinates on a track that starts at x = 0:
//!
//! | Step | Meaning |
//! |---|---|
//! | `down:start:40` | mouse pointer-down on the start thumb |
//! | `touch:end:40` | touch-start on the end thumb |
//! | `move:120` | move of the active pointer |
//! | `up:120` | release of the active pointer |
//! | `cancel` | touch-cancel of the active pointer |
//! | `click:90` | click on the track |
//! | `key:start:PageUp` | key press on a thumb |
//! | `push:30` / `push:20..70` | value pushed by the host |
//! | `frame` | animation frame |
//! | `blur` | focus loss |

use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use tessera_forms::slider::{Endpoint, SliderKey};

/// One scripted step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    MouseDown(Endpoint, f64),
    TouchStart(Endpoint, f64),
    Move(f64),
    Up(f64),
    Cancel,
    Click(f64),
    Key(Endpoint, SliderKey),
    PushSingle(f64),
    PushRange(f64, f64),
    Frame,
    Blur,
}

fn thumb(name: &str) -> anyhow::Result<Endpoint> {
    match name {
        "start" => Ok(Endpoint::Start),
        "end" | "value" => Ok(Endpoint::End),
        other => bail!("unknown thumb `{other}`, expected start, end or value"),
    }
}

fn number(text: &str) -> anyhow::Result<f64> {
    text.parse()
        .with_context(|| format!("`{text}` is not a number"))
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let step = match parts.as_slice() {
            ["down", t, x] => Self::MouseDown(thumb(t)?, number(x)?),
            ["touch", t, x] => Self::TouchStart(thumb(t)?, number(x)?),
            ["move", x] => Self::Move(number(x)?),
            ["up", x] => Self::Up(number(x)?),
            ["cancel"] => Self::Cancel,
            ["click", x] => Self::Click(number(x)?),
            ["key", t, key] => Self::Key(thumb(t)?, key.parse()?),
            ["push", value] => match value.split_once("..") {
                Some((start, end)) => Self::PushRange(number(start)?, number(end)?),
                None => Self::PushSingle(number(value)?),
            },
            ["frame"] => Self::Frame,
            ["blur"] => Self::Blur,
            _ => return Err(anyhow!("unrecognized step `{s}`")),
        };
        Ok(step)
    }
}

/// Parses a whole script.
pub fn parse(script: &str) -> anyhow::Result<Vec<Step>> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            token
                .parse()
                .with_context(|| format!("step {} of the script", index + 1))
        })
        .collect()
}
