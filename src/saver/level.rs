/*
level.rs

Copyright 2025 Hervé Quatremain

This file is part of Luminode.

Luminode is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Luminode is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Luminode. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Save and restore the level in progress.
//!
//! The saved object is a serialization of the [`GeneratedLevel`] object in JSON
//! format. The positions and rotations of the tiles are the ones the player left, and
//! the route stays available to reveal the solution.

use log::debug;
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::config::SAVE_FILE_NAME;
use crate::generator::level::GeneratedLevel;

/// Object to save and restore a level in progress.
pub struct SaverLevel {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverLevel {
    /// Create a [`SaverLevel`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the level must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push(SAVE_FILE_NAME);
        debug!("Save level file: {data_dir:?}");
        SaverLevel {
            save_file: data_dir,
        }
    }

    /// Create a [`SaverLevel`] object that uses the given file.
    pub fn from_file(save_file: PathBuf) -> Self {
        debug!("Save level file: {save_file:?}");
        SaverLevel { save_file }
    }

    pub fn save_file(&self) -> &PathBuf {
        &self.save_file
    }

    /// Retrieve the saved [`GeneratedLevel`] object.
    ///
    /// Return the [`GeneratedLevel`] object or None if there is no saved level.
    pub fn get_level(&self) -> Result<Option<GeneratedLevel>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let level: GeneratedLevel = serde_json::from_reader(reader)?;
        Ok(Some(level))
    }

    /// Save the provided [`GeneratedLevel`] object.
    pub fn save_level(&self, level: &GeneratedLevel) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, level)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the saved level.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
