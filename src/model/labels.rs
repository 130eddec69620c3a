pub const NOT_RECEIVED: &str = "Not received in Lab";
pub const NVI: &str = "NVI";
pub const UNDER_PROCESS: &str = "Under Process";
pub const NPEV: &str = "NPEV";

pub const LABEL_SEPARATOR: &str = " + ";

/// Positive tokens in composition order, paired with the channel they are read from.
pub const POSITIVE_TOKENS: &[(&str, LabelSource)] = &[
    ("SL1", LabelSource::Serotype(0)),
    ("WPV1", LabelSource::Serotype(0)),
    ("SL2", LabelSource::Serotype(1)),
    ("WPV2", LabelSource::Serotype(1)),
    ("SL3", LabelSource::Serotype(2)),
    ("WPV3", LabelSource::Serotype(2)),
    ("NPEV", LabelSource::Entero),
];

/// Specific vaccine-derived forms; the generic "VDPV" token only applies when none match.
pub const VDPV_VARIANTS: &[&str] = &["iVDPV", "cVDPV", "aVDPV"];
pub const VDPV_GENERIC: &str = "VDPV";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    Serotype(usize),
    Entero,
}
