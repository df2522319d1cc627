//! Opening and saving project documents.
//!
//! Cue text is decoded from the file format's markup into internal markup
//! on open and encoded back on save.

use super::{Position, Project, Subtitle};
use crate::error::Result;
use crate::files::{RawCues, SubtitleFile};

impl Project {
    /// Replace the project's contents with the cues of `file`.
    pub fn open_main(&mut self, file: SubtitleFile) -> Result<()> {
        let cues = file.read()?;
        let tags = file.format.tag_format();
        let mode = file.format.mode();

        let mut subtitles = Vec::with_capacity(cues.len());
        for (show, hide, text) in cues.iter() {
            let mut subtitle = Subtitle::with_calc(mode, self.calc);
            subtitle.set_start(Position::from(show))?;
            subtitle.set_end(Position::from(hide))?;
            subtitle.main_text = tags.decode(text);
            subtitles.push(subtitle);
        }

        tracing::info!(
            "Opened main document {} with {} subtitles",
            file.path.display(),
            subtitles.len()
        );
        self.subtitles = subtitles;
        self.mode = mode;
        self.main_file = Some(file);
        self.tran_file = None;
        Ok(())
    }

    /// Write positions and main texts to `file`.
    pub fn save_main(&mut self, file: SubtitleFile) -> Result<()> {
        self.save_document(&file, |subtitle| &subtitle.main_text)?;
        self.main_file = Some(file);
        Ok(())
    }

    /// Read translation texts from `file`, matching cues by index.
    ///
    /// Existing translations are cleared. Cues beyond the end of the
    /// project are appended with their own positions.
    pub fn open_translation(&mut self, file: SubtitleFile) -> Result<()> {
        let cues = file.read()?;
        let tags = file.format.tag_format();

        let mut extra = Vec::new();
        for (show, hide, text) in cues.iter().skip(self.subtitles.len()) {
            let mut subtitle = self.new_subtitle();
            subtitle.set_start(Position::from(show))?;
            subtitle.set_end(Position::from(hide))?;
            subtitle.tran_text = tags.decode(text);
            extra.push(subtitle);
        }

        for subtitle in &mut self.subtitles {
            subtitle.tran_text.clear();
        }
        for (subtitle, text) in self.subtitles.iter_mut().zip(cues.texts()) {
            subtitle.tran_text = tags.decode(text);
        }
        self.subtitles.extend(extra);

        tracing::info!(
            "Opened translation document {} with {} cues",
            file.path.display(),
            cues.len()
        );
        self.tran_file = Some(file);
        Ok(())
    }

    /// Write positions and translation texts to `file`.
    pub fn save_translation(&mut self, file: SubtitleFile) -> Result<()> {
        self.save_document(&file, |subtitle| &subtitle.tran_text)?;
        self.tran_file = Some(file);
        Ok(())
    }

    fn save_document(&self, file: &SubtitleFile, text: impl Fn(&Subtitle) -> &String) -> Result<()> {
        let tags = file.format.tag_format();
        let mut cues = RawCues::new();
        for subtitle in &self.subtitles {
            cues.push(
                subtitle.start_time(),
                subtitle.end_time(),
                tags.encode(text(subtitle)),
            );
        }
        file.write(&cues)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::files::{SubtitleFile, SubtitleFormat};
    use crate::project::{Mode, Project};

    const SRT: &str = "1\n00:00:01,000 --> 00:00:02,000\n<i>Hello</i>\n\n\
                       2\n00:00:03,000 --> 00:00:04,500\n<font color=\"#FF0000\">red</font> text\n";

    #[test]
    fn open_decodes_markup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.srt");
        fs::write(&path, SRT).unwrap();

        let mut project = Project::new(25.0, Mode::Time).unwrap();
        project
            .open_main(SubtitleFile::new(&path, SubtitleFormat::SubRip))
            .unwrap();

        assert_eq!(project.len(), 2);
        assert_eq!(project.subtitles()[0].main_text, "<i>Hello</i>");
        assert_eq!(
            project.subtitles()[1].main_text,
            "<color=\"#ff0000\">red</color> text"
        );
        assert_eq!(project.subtitles()[1].end_time(), "00:00:04.500");
        assert_eq!(project.main_file().map(|f| f.path.clone()), Some(path));
    }

    #[test]
    fn save_reencodes_markup() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.srt");
        fs::write(&input, SRT).unwrap();

        let mut project = Project::default();
        project
            .open_main(SubtitleFile::new(&input, SubtitleFormat::SubRip))
            .unwrap();

        let output = dir.path().join("out.srt");
        project
            .save_main(SubtitleFile::new(&output, SubtitleFormat::SubRip))
            .unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "1\n00:00:01,000 --> 00:00:02,000\n<i>Hello</i>\n\n\
             2\n00:00:03,000 --> 00:00:04,500\n<font color=\"#ff0000\">red</font> text\n\n"
        );
    }

    #[test]
    fn translation_matches_by_index_and_appends() {
        let dir = TempDir::new().unwrap();
        let main = dir.path().join("main.srt");
        fs::write(&main, SRT).unwrap();
        let tran = dir.path().join("tran.txt");
        fs::write(&tran, "00:00:01:Hei\n00:00:03:Punainen\n00:00:09:Extra\n").unwrap();

        let mut project = Project::default();
        project
            .open_main(SubtitleFile::new(&main, SubtitleFormat::SubRip))
            .unwrap();
        project
            .open_translation(SubtitleFile::new(&tran, SubtitleFormat::TMPlayer))
            .unwrap();

        assert_eq!(project.len(), 3);
        assert_eq!(project.subtitles()[0].tran_text, "Hei");
        assert_eq!(project.subtitles()[0].main_text, "<i>Hello</i>");
        assert_eq!(project.subtitles()[1].end_time(), "00:00:04.500");
        assert_eq!(project.subtitles()[2].tran_text, "Extra");
        assert_eq!(project.subtitles()[2].start_time(), "00:00:09.000");
        assert!(project.subtitles()[2].main_text.is_empty());

        let out = dir.path().join("tran.srt");
        project
            .save_translation(SubtitleFile::new(&out, SubtitleFormat::SubRip))
            .unwrap();
        let saved = fs::read_to_string(&out).unwrap();
        assert!(saved.starts_with("1\n00:00:01,000 --> 00:00:02,000\nHei\n\n"));
        assert!(project.tran_file().is_some());
    }

    #[test]
    fn open_missing_file_fails_without_changes() {
        let dir = TempDir::new().unwrap();
        let mut project = Project::default();
        let result = project.open_main(SubtitleFile::new(
            dir.path().join("none.srt"),
            SubtitleFormat::SubRip,
        ));
        assert!(result.is_err());
        assert!(project.is_empty());
        assert!(project.main_file().is_none());
    }
}
