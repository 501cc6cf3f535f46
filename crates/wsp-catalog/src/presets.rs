//! Built-in system presets: typical fixture sets for a dwelling unit or a
//! public toilet block.

use std::collections::BTreeMap;

use crate::fixture::{FixtureKey, Population};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub fixtures: &'static [(&'static str, Population, u32)],
    pub persons: u32,
    pub dwellings: u32,
}

impl Preset {
    pub fn fixture_map(&self) -> BTreeMap<FixtureKey, u32> {
        self.fixtures
            .iter()
            .map(|&(name, population, qty)| (FixtureKey::new(name, population), qty))
            .collect()
    }
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "単身住戸 (1R)",
        fixtures: &[
            ("大便器 (タンク)", Population::Private, 1),
            ("洗面器", Population::Private, 1),
            ("シャワー", Population::Private, 1),
            ("台所流し", Population::Private, 1),
            ("洗濯機", Population::Private, 1),
        ],
        persons: 1,
        dwellings: 1,
    },
    Preset {
        name: "ファミリー (3LDK)",
        fixtures: &[
            ("大便器 (タンク)", Population::Private, 1),
            ("洗面器", Population::Private, 1),
            ("浴槽", Population::Private, 1),
            ("台所流し", Population::Private, 1),
            ("洗濯機", Population::Private, 1),
            ("手洗器", Population::Private, 1),
        ],
        persons: 3,
        dwellings: 1,
    },
    Preset {
        name: "公共トイレ (小)",
        fixtures: &[
            ("大便器 (洗浄弁)", Population::Public, 1),
            ("小便器 (洗浄弁)", Population::Public, 1),
            ("洗面器", Population::Public, 1),
        ],
        persons: 0,
        dwellings: 1,
    },
    Preset {
        name: "公共トイレ (大)",
        fixtures: &[
            ("大便器 (洗浄弁)", Population::Public, 3),
            ("小便器 (洗浄弁)", Population::Public, 3),
            ("洗面器", Population::Public, 3),
            ("掃除用流し", Population::Public, 1),
        ],
        persons: 0,
        dwellings: 1,
    },
];

pub fn builtin_presets() -> &'static [Preset] {
    PRESETS
}

pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name == name)
}
