//! Maps logical uniform slots to locations in a freshly compiled
//! program. Each slot probes an ordered list of candidate names drawn
//! from both dialects; the first hit wins and the result (including
//! "absent") is cached for the whole session, never re-probed per frame.

use chrono::{Datelike, Local, Timelike};

use crate::types::{UniformLocation, CHANNEL_COUNT};

use super::binding::GpuBinding;

/// Fixed semantic uniform slots, independent of source-dialect naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalBinding {
    Channel0Texture,
    Channel1Texture,
    Channel2Texture,
    Channel3Texture,
    Time,
    Mouse2d,
    Mouse4d,
    Resolution2d,
    Resolution3d,
    SurfaceSize,
    ChannelResolutions,
    ChannelTimes,
    Date,
    InputColour,
}

/// Ordered candidate names per logical binding. First match wins.
///
/// The ordering is historical compatibility, not tidiness: `texture` and
/// `tex0` outrank `iChannel0` even for Toy-dialect shaders, and the
/// array-form names are tried before each indexed element because GL
/// implementations disagree on how array uniforms are reported.
const CANDIDATES: &[(LogicalBinding, &[&str])] = &[
    (
        LogicalBinding::Channel0Texture,
        &["texture", "tex0", "backbuffer", "bbuff", "iChannel0"],
    ),
    (LogicalBinding::Channel1Texture, &["tex1", "iChannel1"]),
    (LogicalBinding::Channel2Texture, &["iChannel2"]),
    (LogicalBinding::Channel3Texture, &["iChannel3"]),
    (LogicalBinding::Time, &["time", "iGlobalTime"]),
    (LogicalBinding::Mouse2d, &["mouse"]),
    (LogicalBinding::Mouse4d, &["iMouse"]),
    (LogicalBinding::Resolution2d, &["resolution"]),
    (LogicalBinding::Resolution3d, &["iResolution"]),
    (LogicalBinding::SurfaceSize, &["surfaceSize"]),
    (
        LogicalBinding::ChannelTimes,
        &[
            "iChannelTime[4]",
            "iChannelTime[0]",
            "iChannelTime[1]",
            "iChannelTime[2]",
            "iChannelTime[3]",
        ],
    ),
    (
        LogicalBinding::ChannelResolutions,
        &[
            "iChannelResolution[4]",
            "iChannelResolution[0]",
            "iChannelResolution[1]",
            "iChannelResolution[2]",
            "iChannelResolution[3]",
        ],
    ),
    (LogicalBinding::Date, &["iDate"]),
    (LogicalBinding::InputColour, &["inputColour"]),
];

/// Resolved uniform locations for one loaded shader. Populated once per
/// successful load; `None` means the binding is skipped unconditionally
/// until the next load.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformBindings {
    pub channel_textures: [Option<UniformLocation>; CHANNEL_COUNT],
    pub time: Option<UniformLocation>,
    pub mouse_2d: Option<UniformLocation>,
    pub mouse_4d: Option<UniformLocation>,
    pub resolution_2d: Option<UniformLocation>,
    pub resolution_3d: Option<UniformLocation>,
    pub surface_size: Option<UniformLocation>,
    pub channel_resolutions: Option<UniformLocation>,
    pub channel_times: Option<UniformLocation>,
    pub date: Option<UniformLocation>,
    pub input_colour: Option<UniformLocation>,
}

impl UniformBindings {
    /// Probes the bound `program` for every logical binding. Must run
    /// with the program bound, after a successful compile, before the
    /// first frame.
    pub fn resolve(program: &mut dyn GpuBinding) -> Self {
        let mut bindings = Self::default();
        for (binding, names) in CANDIDATES {
            let location = names.iter().find_map(|name| program.find_uniform(name));
            bindings.set(*binding, location);
        }
        bindings
    }

    pub fn get(&self, binding: LogicalBinding) -> Option<UniformLocation> {
        match binding {
            LogicalBinding::Channel0Texture => self.channel_textures[0],
            LogicalBinding::Channel1Texture => self.channel_textures[1],
            LogicalBinding::Channel2Texture => self.channel_textures[2],
            LogicalBinding::Channel3Texture => self.channel_textures[3],
            LogicalBinding::Time => self.time,
            LogicalBinding::Mouse2d => self.mouse_2d,
            LogicalBinding::Mouse4d => self.mouse_4d,
            LogicalBinding::Resolution2d => self.resolution_2d,
            LogicalBinding::Resolution3d => self.resolution_3d,
            LogicalBinding::SurfaceSize => self.surface_size,
            LogicalBinding::ChannelResolutions => self.channel_resolutions,
            LogicalBinding::ChannelTimes => self.channel_times,
            LogicalBinding::Date => self.date,
            LogicalBinding::InputColour => self.input_colour,
        }
    }

    fn set(&mut self, binding: LogicalBinding, location: Option<UniformLocation>) {
        match binding {
            LogicalBinding::Channel0Texture => self.channel_textures[0] = location,
            LogicalBinding::Channel1Texture => self.channel_textures[1] = location,
            LogicalBinding::Channel2Texture => self.channel_textures[2] = location,
            LogicalBinding::Channel3Texture => self.channel_textures[3] = location,
            LogicalBinding::Time => self.time = location,
            LogicalBinding::Mouse2d => self.mouse_2d = location,
            LogicalBinding::Mouse4d => self.mouse_4d = location,
            LogicalBinding::Resolution2d => self.resolution_2d = location,
            LogicalBinding::Resolution3d => self.resolution_3d = location,
            LogicalBinding::SurfaceSize => self.surface_size = location,
            LogicalBinding::ChannelResolutions => self.channel_resolutions = location,
            LogicalBinding::ChannelTimes => self.channel_times = location,
            LogicalBinding::Date => self.date = location,
            LogicalBinding::InputColour => self.input_colour = location,
        }
    }
}

/// Builds the `iDate` vector: years since 1900, 1-based month, day of
/// month, and whole seconds since local midnight.
pub(crate) fn date_vector() -> [f32; 4] {
    let now = Local::now();
    [
        (now.year() - 1900) as f32,
        now.month() as f32,
        now.day() as f32,
        now.num_seconds_from_midnight() as f32,
    ]
}
