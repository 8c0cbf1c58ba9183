use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::disk::gcr::{self, DOS33_INTERLEAVE, IDENTITY_INTERLEAVE, IMAGE_SIZE, NIB_SIZE, PRODOS_INTERLEAVE};
use crate::error::{EmulatorError, Result};
use crate::log::{self, Severity};

/// Half-tracks run 0..=MAX_DRIVE_STEPS, i.e. 35 full tracks.
pub const MAX_DRIVE_STEPS: i32 = 69;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    None,
    Dos,
    ProDos,
    Nib,
}

impl ImageType {
    fn interleave(self) -> &'static [usize; 16] {
        match self {
            ImageType::Dos => &DOS33_INTERLEAVE,
            ImageType::ProDos => &PRODOS_INTERLEAVE,
            ImageType::Nib | ImageType::None => &IDENTITY_INTERLEAVE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveMode {
    Read,
    Write,
}

/// A single Disk II drive: its stepper-motor head position, the nibblized
/// medium, and the backing file it was loaded from (if any).
pub struct Drive {
    pub image: Option<Vec<u8>>,
    pub data: Option<Vec<u8>>,
    pub image_type: ImageType,
    pub track_position: i32,
    pub sector_position: i32,
    pub phase: i32,
    pub mode: DriveMode,
    pub latch: u8,
    pub online: bool,
    pub write_protect: bool,
    pub locked: bool,
    stream_path: Option<String>,
}

impl Drive {
    pub fn new() -> Self {
        Drive {
            image: None,
            data: None,
            image_type: ImageType::None,
            track_position: 0,
            sector_position: 0,
            phase: 0,
            mode: DriveMode::Read,
            latch: 0,
            online: false,
            write_protect: true,
            locked: false,
            stream_path: None,
        }
    }

    /// Load `path` into the drive. Logical images must be exactly
    /// `IMAGE_SIZE` bytes; NIB images must be exactly `NIB_SIZE` bytes.
    /// Anything else is `BadFile`.
    pub fn insert(&mut self, path: &str, image_type: ImageType) -> Result<()> {
        let mut file = File::open(path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        match image_type {
            ImageType::Nib => {
                if bytes.len() != NIB_SIZE {
                    return Err(EmulatorError::BadFile(format!(
                        "NIB image must be {} bytes, got {}",
                        NIB_SIZE,
                        bytes.len()
                    )));
                }
                self.data = Some(bytes.clone());
                self.image = Some(gcr::decode_disk(&bytes)?);
            }
            ImageType::Dos | ImageType::ProDos => {
                if bytes.len() != IMAGE_SIZE {
                    return Err(EmulatorError::BadFile(format!(
                        "logical image must be {} bytes, got {}",
                        IMAGE_SIZE,
                        bytes.len()
                    )));
                }
                self.data = Some(self.encode(&bytes, image_type)?);
                self.image = Some(bytes);
            }
            ImageType::None => {
                return Err(EmulatorError::BadOption("no image type selected".into()));
            }
        }

        self.image_type = image_type;
        self.stream_path = Some(path.to_string());
        self.track_position = 0;
        self.sector_position = 0;
        Ok(())
    }

    fn encode(&self, image: &[u8], image_type: ImageType) -> Result<Vec<u8>> {
        gcr::encode_disk(image, image_type.interleave())
    }

    fn decode(&self) -> Result<Vec<u8>> {
        match &self.data {
            Some(data) if self.image_type == ImageType::Nib => Ok(data.clone()),
            Some(data) => gcr::decode_disk(data),
            None => Err(EmulatorError::InvalidOperation("no media in drive".into())),
        }
    }

    /// Decode the current `data` back into `image`, then rewrite the
    /// backing file in full (no journaling).
    pub fn save(&mut self) -> Result<()> {
        if self.data.is_none() {
            return Ok(());
        }
        let decoded = match self.decode() {
            Ok(decoded) => decoded,
            Err(error) => {
                log::log(Severity::Crit, &format!("disk decode failed on save: {}", error));
                return Err(error);
            }
        };
        self.image = Some(decoded.clone());

        if let Some(path) = &self.stream_path {
            match File::create(path) {
                Ok(mut file) => {
                    file.seek(SeekFrom::Start(0))?;
                    if let Err(error) = file.write_all(&decoded) {
                        log::log(Severity::Crit, &format!("disk save failed: {}", error));
                        return Err(EmulatorError::Io(error));
                    }
                }
                Err(error) => {
                    log::log(Severity::Crit, &format!("disk save failed: {}", error));
                    return Err(EmulatorError::Io(error));
                }
            }
        }
        Ok(())
    }

    /// Decode, save, and release both segments.
    pub fn eject(&mut self) -> Result<()> {
        if self.data.is_some() {
            self.save()?;
            self.data = None;
            self.image = None;
        }
        self.track_position = 0;
        self.sector_position = 0;
        Ok(())
    }

    pub fn position(&self) -> usize {
        if self.data.is_none() {
            return 0;
        }
        let track_offset = (self.track_position / 2) as usize * gcr::ENC_ETRACK;
        track_offset + self.sector_position as usize
    }

    /// Read the byte under the head and shift forward one byte.
    pub fn read(&mut self) -> u8 {
        let data = match &self.data {
            Some(data) => data,
            None => return 0,
        };
        let byte = data[self.position()];
        self.latch = byte;
        self.shift(1);
        byte
    }

    /// Commit the latch to the medium and shift forward one byte, but only
    /// if the latch's high bit is set, the drive is in WRITE mode, and the
    /// media is not write-protected. A no-op without media.
    pub fn write(&mut self) {
        if self.data.is_none() {
            return;
        }
        if self.latch & 0x80 != 0 && self.mode == DriveMode::Write && !self.write_protect {
            let position = self.position();
            if let Some(data) = &mut self.data {
                data[position] = self.latch;
            }
            self.shift(1);
        }
    }

    /// Shift the head `delta` bytes within the current track. Wraps to 0
    /// at the end-of-track boundary without advancing `track_position` —
    /// preserved as observed in the source, not auto-corrected.
    pub fn shift(&mut self, delta: i32) {
        if self.locked {
            return;
        }
        self.sector_position += delta;
        if self.sector_position >= gcr::ENC_ETRACK as i32 {
            self.sector_position = 0;
        }
    }

    /// Move the head `steps` half-tracks, clamped to `[0, MAX_DRIVE_STEPS]`.
    pub fn step(&mut self, steps: i32) {
        self.track_position += steps;
        if self.track_position > MAX_DRIVE_STEPS {
            self.track_position = MAX_DRIVE_STEPS;
        } else if self.track_position < 0 {
            self.track_position = 0;
        }
        self.sector_position = 0;
    }

    /// Energize `phase` (1..4), or de-energize with any other value. Looks
    /// up the step delta in the circular stepper transition table and
    /// applies it via `step`, then records the new phase.
    pub fn phaser(&mut self, phase: i32) {
        if !(0..=4).contains(&phase) {
            return;
        }
        const TRANSITIONS: [i32; 25] = [
            0, 0, 0, 0, 0, //
            0, 0, 1, 0, -1, //
            0, -1, 0, 1, 0, //
            0, 0, -1, 0, 1, //
            0, 1, 0, -1, 0,
        ];
        let delta = TRANSITIONS[(self.phase * 5 + phase) as usize];
        self.step(delta);
        self.phase = phase;
    }

    pub fn turn_on(&mut self, online: bool) {
        self.online = online;
    }

    pub fn set_mode(&mut self, mode: DriveMode) {
        self.mode = mode;
    }

    pub fn set_latch(&mut self, value: u8) {
        if self.mode == DriveMode::Write {
            self.latch = value;
        }
    }

    /// Dispatch the 0xC soft-switch: read-through when in READ mode or the
    /// media is write-protected, else commit the latch.
    pub fn read_write_switch(&mut self) -> u8 {
        if self.mode == DriveMode::Read || self.write_protect {
            self.read()
        } else {
            self.write();
            0
        }
    }
}

impl Default for Drive {
    fn default() -> Self {
        Drive::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn phaser_walk_matches_scenario() {
        let mut drive = Drive::new();
        drive.track_position = 3;
        drive.phase = 2;
        drive.phaser(1);
        assert_eq!(drive.track_position, 2);
        assert_eq!(drive.phase, 1);

        drive.phase = 3;
        drive.track_position = 5;
        drive.phaser(4);
        assert_eq!(drive.track_position, 6);
        assert_eq!(drive.phase, 4);
    }

    #[test]
    fn step_clamps_at_bounds() {
        let mut drive = Drive::new();
        drive.track_position = 0;
        drive.step(-5);
        assert_eq!(drive.track_position, 0);

        drive.track_position = MAX_DRIVE_STEPS;
        drive.step(5);
        assert_eq!(drive.track_position, MAX_DRIVE_STEPS);
    }

    #[test]
    fn sector_position_wraps_without_advancing_track() {
        let mut drive = Drive::new();
        drive.data = Some(vec![0u8; NIB_SIZE]);
        drive.track_position = 4;
        drive.sector_position = gcr::ENC_ETRACK as i32 - 1;
        drive.shift(3);
        assert_eq!(drive.sector_position, 0);
        assert_eq!(drive.track_position, 4);
    }

    #[test]
    fn read_returns_zero_without_media() {
        let mut drive = Drive::new();
        assert_eq!(drive.read(), 0);
    }

    #[test]
    fn write_requires_latch_high_bit_and_write_mode() {
        let mut drive = Drive::new();
        drive.data = Some(vec![0u8; NIB_SIZE]);
        drive.write_protect = false;
        drive.mode = DriveMode::Write;

        drive.latch = 0x7F; // high bit clear, should not commit
        let before = drive.position();
        drive.write();
        assert_eq!(drive.sector_position as usize, before);

        drive.latch = 0x80;
        drive.write();
        assert_eq!(drive.data.as_ref().unwrap()[before], 0x80);
    }
}
