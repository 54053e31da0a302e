//! The ten blessings shipped with the configurator
//!
//! Content lives in `data/blessings/*.toml`; it is compiled in so a session
//! never depends on the working directory.

/// (file name, TOML source) for every built-in blessing, in page order
pub static BUILTIN_BLESSINGS: &[(&str, &str)] = &[
    ("beastcaller.toml", include_str!("../../data/blessings/beastcaller.toml")),
    ("emberheart.toml", include_str!("../../data/blessings/emberheart.toml")),
    ("tidesinger.toml", include_str!("../../data/blessings/tidesinger.toml")),
    ("stormborn.toml", include_str!("../../data/blessings/stormborn.toml")),
    ("gravebinder.toml", include_str!("../../data/blessings/gravebinder.toml")),
    ("mindsight.toml", include_str!("../../data/blessings/mindsight.toml")),
    ("verdant.toml", include_str!("../../data/blessings/verdant.toml")),
    ("ironclad.toml", include_str!("../../data/blessings/ironclad.toml")),
    ("starseer.toml", include_str!("../../data/blessings/starseer.toml")),
    ("wardweaver.toml", include_str!("../../data/blessings/wardweaver.toml")),
];
