use crate::config::types::{Caps, OptionOverrides};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// 具名樣板：在命令列參數之前預先填入一組設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Template {
    #[serde(rename = "3x3")]
    ThreeByThree,
    #[serde(rename = "big")]
    Big,
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "huge")]
    Huge,
    #[serde(rename = "mpc")]
    Mpc,
}

impl Template {
    pub const ALL: [Self; 5] = [
        Self::ThreeByThree,
        Self::Big,
        Self::Custom,
        Self::Huge,
        Self::Mpc,
    ];

    /// 用於輸出檔名 `{basename}-{template}.jpg`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ThreeByThree => "3x3",
            Self::Big => "big",
            Self::Custom => "custom",
            Self::Huge => "huge",
            Self::Mpc => "mpc",
        }
    }

    #[must_use]
    pub fn overrides(self) -> OptionOverrides {
        match self {
            Self::ThreeByThree => OptionOverrides {
                caps: Some(Caps::Count(9)),
                columns: Some(3),
                ..OptionOverrides::default()
            },
            Self::Big => OptionOverrides {
                caps: Some(Caps::Count(100)),
                columns: Some(10),
                ..OptionOverrides::default()
            },
            Self::Custom => OptionOverrides::default(),
            Self::Huge => OptionOverrides {
                caps: Some(Caps::Maximum),
                columns: Some(25),
                ..OptionOverrides::default()
            },
            Self::Mpc => OptionOverrides {
                header: Some(true),
                timestamp: Some(true),
                caps: Some(Caps::Count(9)),
                columns: Some(3),
                shadow: Some(true),
                border: Some(2),
                spacing: Some(4),
                ..OptionOverrides::default()
            },
        }
    }
}

impl FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|template| template.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|t| t.name()).collect();
                format!("未知的樣板 {s}，可用: {}", names.join(", "))
            })
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
