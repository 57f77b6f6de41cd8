//! Built-in equipment catalog.

use crate::EquipmentCategory::{Adapter, Console, Display, Switcher, Upscaler};
use crate::EquipmentTemplate;

pub(crate) fn catalog() -> Vec<EquipmentTemplate> {
    let mut templates = Vec::with_capacity(32);
    templates.extend(consoles());
    templates.extend(switchers());
    templates.extend(upscalers());
    templates.extend(adapters());
    templates.extend(displays());
    templates
}

fn consoles() -> Vec<EquipmentTemplate> {
    vec![
        EquipmentTemplate::new("atari-2600", "Atari 2600", Console, &[], &["rf"])
            .with_signals(&["rf"]),
        EquipmentTemplate::new("nes", "Nintendo NES", Console, &[], &["rf", "composite"])
            .with_signals(&["rf", "composite"]),
        EquipmentTemplate::new(
            "snes",
            "Super Nintendo",
            Console,
            &[],
            &["rf", "composite", "s-video", "rgb"],
        )
        .with_signals(&["rf", "composite", "s-video", "rgb"]),
        EquipmentTemplate::new(
            "n64",
            "Nintendo 64",
            Console,
            &[],
            &["rf", "composite", "s-video"],
        )
        .with_signals(&["rf", "composite", "s-video"]),
        EquipmentTemplate::new(
            "gamecube",
            "Nintendo GameCube",
            Console,
            &[],
            &["composite", "s-video", "rgb", "component"],
        ),
        EquipmentTemplate::new(
            "genesis",
            "Sega Genesis / Mega Drive",
            Console,
            &[],
            &["rf", "composite", "rgb"],
        )
        .with_signals(&["rf", "composite", "rgb"]),
        EquipmentTemplate::new(
            "saturn",
            "Sega Saturn",
            Console,
            &[],
            &["composite", "s-video", "rgb"],
        ),
        EquipmentTemplate::new(
            "dreamcast",
            "Sega Dreamcast",
            Console,
            &[],
            &["composite", "s-video", "rgb", "vga"],
        ),
        EquipmentTemplate::new(
            "pc-engine",
            "PC Engine / TurboGrafx-16",
            Console,
            &[],
            &["rf", "composite"],
        ),
        EquipmentTemplate::new(
            "neo-geo-aes",
            "Neo Geo AES",
            Console,
            &[],
            &["composite", "rgb"],
        ),
        EquipmentTemplate::new(
            "ps1",
            "PlayStation",
            Console,
            &[],
            &["composite", "s-video", "rgb"],
        ),
        EquipmentTemplate::new(
            "ps2",
            "PlayStation 2",
            Console,
            &[],
            &["composite", "s-video", "rgb", "component"],
        ),
        EquipmentTemplate::new(
            "xbox",
            "Xbox",
            Console,
            &[],
            &["composite", "s-video", "component"],
        ),
    ]
}

fn switchers() -> Vec<EquipmentTemplate> {
    vec![
        EquipmentTemplate::new("svs", "Scalable Video Switch", Switcher, &[], &[]).scalable(32, 6),
        EquipmentTemplate::new(
            "svs-gscartsw",
            "gscartsw SCART Switch",
            Switcher,
            &["scart", "scart", "scart", "scart", "scart", "scart", "scart", "scart"],
            &["scart", "scart"],
        )
        .scalable(8, 2)
        .with_signals(&["scart", "rgb"]),
        EquipmentTemplate::new(
            "scart-switch-3",
            "3-Way SCART Switch",
            Switcher,
            &["scart", "scart", "scart"],
            &["scart"],
        ),
        EquipmentTemplate::new(
            "component-switch-4",
            "4-Port Component Switch",
            Switcher,
            &["component", "component", "component", "component"],
            &["component"],
        ),
        EquipmentTemplate::new(
            "av-selector",
            "Composite / S-Video Selector",
            Switcher,
            &["composite", "composite", "s-video", "s-video"],
            &["composite", "s-video"],
        ),
        EquipmentTemplate::new(
            "hdmi-switch-5",
            "5-Port HDMI Switch",
            Switcher,
            &["hdmi", "hdmi", "hdmi", "hdmi", "hdmi"],
            &["hdmi"],
        ),
    ]
}

fn upscalers() -> Vec<EquipmentTemplate> {
    vec![
        EquipmentTemplate::new(
            "ossc",
            "Open Source Scan Converter",
            Upscaler,
            &["scart", "component", "vga"],
            &["hdmi"],
        ),
        EquipmentTemplate::new(
            "retrotink-2x",
            "RetroTINK 2X",
            Upscaler,
            &["composite", "s-video", "component"],
            &["hdmi"],
        ),
        EquipmentTemplate::new(
            "retrotink-5x",
            "RetroTINK 5X Pro",
            Upscaler,
            &["scart", "component", "composite", "s-video"],
            &["hdmi"],
        ),
    ]
}

fn adapters() -> Vec<EquipmentTemplate> {
    vec![
        EquipmentTemplate::new(
            "scart-rgb-breakout",
            "SCART to RGB Breakout",
            Adapter,
            &["scart"],
            &["rgb"],
        ),
        EquipmentTemplate::new(
            "rgb-to-scart",
            "RGB to SCART Cable",
            Adapter,
            &["rgb"],
            &["scart"],
        ),
        EquipmentTemplate::new(
            "rca-composite",
            "RCA Composite Cable",
            Adapter,
            &["rca"],
            &["composite"],
        ),
        EquipmentTemplate::new("bnc-to-vga", "BNC to VGA Adapter", Adapter, &["bnc"], &["vga"]),
        EquipmentTemplate::new("rf-modulator", "RF Modulator", Adapter, &["composite"], &["rf"]),
    ]
}

fn displays() -> Vec<EquipmentTemplate> {
    vec![
        EquipmentTemplate::new("crt-rf-tv", "Portable CRT (RF only)", Display, &["rf"], &[]),
        EquipmentTemplate::new(
            "trinitron-kv27",
            "Sony Trinitron KV-27",
            Display,
            &["rf", "composite", "s-video", "component"],
            &[],
        ),
        EquipmentTemplate::new(
            "pvm-20m2",
            "Sony PVM-20M2",
            Display,
            &["composite", "s-video", "rgb", "component"],
            &[],
        )
        .with_signals(&["composite", "s-video", "rgb", "component"]),
        EquipmentTemplate::new(
            "euro-crt",
            "European SCART CRT",
            Display,
            &["rf", "scart", "scart"],
            &[],
        ),
        EquipmentTemplate::new("bvm-bnc", "Sony BVM (BNC)", Display, &["bnc", "bnc"], &[]),
        EquipmentTemplate::new(
            "lcd-tv",
            "HDMI Flat Panel",
            Display,
            &["hdmi", "hdmi", "component", "composite", "vga"],
            &[],
        ),
    ]
}
