//! The interactive command menu.
//!
//! Reads one answer per line from `input` and writes prompts and results to
//! `out`. Failed commands are reported and the menu keeps running; end of
//! input leaves the menu without saving.

use std::io::{self, BufRead, Write};

use gridcalc_workbook::{OpenOutcome, Session, WorkbookError};

const MENU: &str = "Choose a command:
1. Open
2. Save As
3. Exit
4. Save
5. Edit Cell
6. Print
Enter your choice: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Open,
    SaveAs,
    Exit,
    Save,
    EditCell,
    Print,
}

impl Choice {
    fn parse(answer: &str) -> Option<Self> {
        match answer.trim() {
            "1" => Some(Choice::Open),
            "2" => Some(Choice::SaveAs),
            "3" => Some(Choice::Exit),
            "4" => Some(Choice::Save),
            "5" => Some(Choice::EditCell),
            "6" => Some(Choice::Print),
            _ => None,
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

pub struct Menu<R, W> {
    session: Session,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(session: Session, input: R, out: W) -> Self {
        Self {
            session,
            input,
            out,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(answer) = self.prompt(MENU)? else {
                return Ok(());
            };
            let flow = match Choice::parse(&answer) {
                // opening twice is silently ignored
                Some(Choice::Open) if self.session.is_open() => Flow::Continue,
                Some(Choice::Open) => self.open()?,
                Some(Choice::SaveAs) => self.save_as()?,
                Some(Choice::Exit) => self.exit()?,
                Some(Choice::Save) => self.save()?,
                Some(Choice::EditCell) => self.edit_cell()?,
                Some(Choice::Print) => self.print()?,
                None => {
                    writeln!(self.out, "Invalid choice. Try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Quit = flow {
                return Ok(());
            }
            writeln!(self.out)?;
        }
    }

    /// Write `text`, then read one line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn open(&mut self) -> io::Result<Flow> {
        loop {
            let Some(path) = self.prompt("Enter file path to load table: ")? else {
                return Ok(Flow::Quit);
            };
            let path = path.trim();
            match self.session.open(path) {
                Ok(OpenOutcome::Opened { rejected, .. }) => {
                    writeln!(self.out, "Successfully opened {path}")?;
                    for r in &rejected {
                        writeln!(self.out, "Skipped {} at {}: {}", r.token, r.coord, r.error)?;
                    }
                    return Ok(Flow::Continue);
                }
                Ok(OpenOutcome::AlreadyOpen) => return Ok(Flow::Continue),
                Err(WorkbookError::InvalidExtension { .. }) => {
                    writeln!(self.out, "Wrong file extension, enter again")?;
                }
                Err(err) => {
                    writeln!(self.out, "{err}")?;
                    return Ok(Flow::Continue);
                }
            }
        }
    }

    /// `None` at end of input, `Some(false)` when the table was not written.
    fn save_as_inner(&mut self) -> io::Result<Option<bool>> {
        loop {
            let Some(path) = self.prompt("Enter file path to save the file in: ")? else {
                return Ok(None);
            };
            match self.session.save_as(path.trim()) {
                Ok(()) => {
                    writeln!(self.out, "Table successfully saved")?;
                    return Ok(Some(true));
                }
                Err(WorkbookError::InvalidExtension { .. }) => {
                    writeln!(self.out, "Wrong file extension, enter again")?;
                }
                Err(err) => {
                    writeln!(self.out, "{err}")?;
                    return Ok(Some(false));
                }
            }
        }
    }

    fn save_as(&mut self) -> io::Result<Flow> {
        Ok(match self.save_as_inner()? {
            None => Flow::Quit,
            Some(_) => Flow::Continue,
        })
    }

    fn save_inner(&mut self) -> io::Result<bool> {
        match self.session.save() {
            Ok(()) => {
                writeln!(self.out, "Table successfully saved")?;
                Ok(true)
            }
            Err(err) => {
                writeln!(self.out, "{err}")?;
                Ok(false)
            }
        }
    }

    fn save(&mut self) -> io::Result<Flow> {
        self.save_inner()?;
        Ok(Flow::Continue)
    }

    /// A failed save returns to the menu instead of exiting.
    fn exit(&mut self) -> io::Result<Flow> {
        let Some(answer) =
            self.prompt("Do you want to save before you exit? 1.yes/2.no/3.saveAs ")?
        else {
            return Ok(Flow::Quit);
        };
        let saved = match answer.trim() {
            "1" => self.save_inner()?,
            "3" => match self.save_as_inner()? {
                Some(saved) => saved,
                None => return Ok(Flow::Quit),
            },
            _ => true,
        };
        Ok(if saved { Flow::Quit } else { Flow::Continue })
    }

    fn edit_cell(&mut self) -> io::Result<Flow> {
        let Some(row) = self.prompt("Enter the row: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(col) = self.prompt("Enter the column: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(data) = self.prompt("Enter the data: ")? else {
            return Ok(Flow::Quit);
        };
        let (Ok(row), Ok(col)) = (row.trim().parse::<u32>(), col.trim().parse::<u32>()) else {
            writeln!(self.out, "Wrong coordinates given")?;
            return Ok(Flow::Continue);
        };
        match self.session.edit_cell(row, col, &data) {
            Ok(_) => {}
            Err(WorkbookError::OutOfBounds(_)) => writeln!(self.out, "Wrong coordinates given")?,
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn print(&mut self) -> io::Result<Flow> {
        let table = self.session.render().to_string();
        write!(self.out, "{table}")?;
        Ok(Flow::Continue)
    }
}
