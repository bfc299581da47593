use ising::{Lattice, Observer, ObserverError};
use std::io::{self, Write};

/// Draws each observed lattice as a block of text
///
/// A frame is a `trial <n>` header, one line per lattice row and a blank
/// line. Write failures are reported to the driver, which aborts the run.
pub struct TextRenderer<W: Write> {
    writer: W,
    up: char,
    down: char,
    frames: u64,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(writer: W, up: char, down: char) -> Self {
        Self {
            writer,
            up,
            down,
            frames: 0,
        }
    }

    /// Frames written so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&mut self, lattice: &Lattice, trial: u64) -> io::Result<()> {
        writeln!(self.writer, "trial {}", trial)?;
        for row in lattice.rows() {
            let line: String = row
                .map(|spin| if spin > 0 { self.up } else { self.down })
                .collect();
            writeln!(self.writer, "{}", line)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

impl<W: Write> Observer for TextRenderer<W> {
    fn observe(&mut self, lattice: &Lattice, trial: u64) -> Result<(), ObserverError> {
        self.render(lattice, trial)?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ising::{run, IsingError, ObserveEvery, RunConfig};

    #[test]
    fn test_frame_layout() {
        let lattice = Lattice::from_rows(&[vec![1, -1, 1], vec![-1, -1, 1], vec![1, 1, 1]]).unwrap();
        let mut renderer = TextRenderer::new(Vec::new(), '#', '.');
        renderer.observe(&lattice, 42).unwrap();
        assert_eq!(renderer.frames(), 1);
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "trial 42\n#.#\n..#\n###\n\n");
    }

    #[test]
    fn test_renderer_as_run_observer() {
        let config = RunConfig::new(4, 2.0)
            .with_total_trials(10)
            .with_observe_every(ObserveEvery::Never)
            .with_seed(1);
        let mut renderer = TextRenderer::new(Vec::new(), '+', '-');
        let lattice = run(&config, Some(&mut renderer)).unwrap();
        assert_eq!(renderer.frames(), 2);

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        let last_frame: Vec<&str> = text.lines().skip(6).take(5).collect();
        assert_eq!(last_frame[0], "trial 9");
        for (line, row) in last_frame[1..].iter().zip(lattice.rows()) {
            let expected: String = row.map(|s| if s > 0 { '+' } else { '-' }).collect();
            assert_eq!(*line, expected);
        }
    }

    /// Writer that always fails, like a closed pipe
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_aborts_run() {
        let config = RunConfig::new(4, 2.0).with_total_trials(10).with_seed(1);
        let mut renderer = TextRenderer::new(Broken, '#', '.');
        let err = run(&config, Some(&mut renderer)).unwrap_err();
        match err {
            IsingError::Observer(inner) => {
                let io_err = inner.downcast_ref::<io::Error>().unwrap();
                assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(renderer.frames(), 0);
    }
}
