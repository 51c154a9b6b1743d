mod fixture;
mod renderer;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use fixture::Fixture;
use ratatui::DefaultTerminal;
use segment::{
    BlockConfig, CaretPosition, EditCommand, EditOutcome, SpeechBlock, text::char_len,
};
use segment_interface::{SegmentData, SpeakerRef, WordData};

#[derive(clap::Parser)]
#[command(name = "editor", about = "Edit speech segments in the terminal")]
struct Args {
    #[arg(short, long, default_value_t = Fixture::Standup)]
    fixture: Fixture,
}

fn speakers() -> Vec<SpeakerRef> {
    [(1, "Alice"), (2, "Bob"), (3, "Host"), (4, "Guest")]
        .into_iter()
        .map(|(id, name)| SpeakerRef {
            id,
            name: name.to_string(),
            icon: None,
        })
        .collect()
}

struct App {
    blocks: Vec<SpeechBlock>,
    active: usize,
    caret_node: usize,
    caret_offset: usize,
    select_all: bool,
    fixture_name: String,
    status: String,
}

impl App {
    fn new(segments: Vec<SegmentData>, fixture_name: String) -> Self {
        let config = BlockConfig {
            speakers: speakers(),
        };
        let blocks = segments
            .into_iter()
            .map(|data| SpeechBlock::new(Some(data), config.clone(), false))
            .collect();

        Self {
            blocks,
            active: 0,
            caret_node: 0,
            caret_offset: 0,
            select_all: false,
            fixture_name,
            status: String::new(),
        }
    }

    fn active_block(&self) -> &SpeechBlock {
        &self.blocks[self.active]
    }

    fn active_block_mut(&mut self) -> &mut SpeechBlock {
        &mut self.blocks[self.active]
    }

    fn caret(&self) -> CaretPosition {
        let mut caret = CaretPosition::collapsed(self.caret_node, self.caret_offset);
        caret.is_all_selected = self.select_all;
        caret
    }

    /// Surface text of the caret's node, with the leading separator width.
    fn caret_surface(&self) -> (String, usize) {
        let text = self
            .active_block()
            .view()
            .node(self.caret_node)
            .map(|n| n.text().to_string())
            .unwrap_or_default();
        let lead = text.chars().take_while(|c| c.is_whitespace()).count();
        (text, lead)
    }

    fn node_max_offset(&self) -> usize {
        let (text, lead) = self.caret_surface();
        char_len(&text).saturating_sub(lead)
    }

    fn clamp_caret(&mut self) {
        let len = self.active_block().view().len();
        if len == 0 {
            self.caret_node = 0;
            self.caret_offset = 0;
            return;
        }
        self.caret_node = self.caret_node.min(len - 1);
        self.caret_offset = self.caret_offset.min(self.node_max_offset());
    }

    fn move_left(&mut self) {
        if self.caret_offset > 0 {
            self.caret_offset -= 1;
        } else if self.caret_node > 0 {
            self.caret_node -= 1;
            self.caret_offset = self.node_max_offset();
        }
    }

    fn move_right(&mut self) {
        if self.caret_offset < self.node_max_offset() {
            self.caret_offset += 1;
        } else if self.caret_node + 1 < self.active_block().view().len() {
            self.caret_node += 1;
            self.caret_offset = 0;
        }
    }

    fn switch_block(&mut self, delta: isize) {
        let target = self.active as isize + delta;
        if target >= 0 && (target as usize) < self.blocks.len() {
            self.active = target as usize;
            self.caret_node = 0;
            self.caret_offset = 0;
            self.select_all = false;
        }
    }

    fn command(&mut self, command: EditCommand) -> EditOutcome {
        let caret = self.caret();
        let outcome = self.active_block_mut().handle_key(&caret, command);

        match &outcome {
            EditOutcome::Mutated { caret } => {
                if let Some(node) = caret.node {
                    self.caret_node = node;
                    self.caret_offset = caret.offset;
                }
                self.clamp_caret();
            }
            EditOutcome::SelectAllRequested => {
                self.select_all = true;
            }
            EditOutcome::SplitRequested { remainder } => {
                self.insert_block_after_active(remainder.clone());
            }
            EditOutcome::NoOp
            | EditOutcome::PassThrough
            | EditOutcome::SpeakerChangeRequested { .. } => {}
        }

        outcome
    }

    fn insert_block_after_active(&mut self, remainder: Vec<segment::Word>) {
        let timestamp = remainder.first().map(|w| w.start).unwrap_or(0.0);
        let data = SegmentData {
            id: None,
            timestamp,
            was_split: true,
            text: remainder.into_iter().map(WordData::from).collect(),
            ..SegmentData::default()
        };

        let block = SpeechBlock::new(
            Some(data),
            BlockConfig {
                speakers: speakers(),
            },
            false,
        );
        self.blocks.insert(self.active + 1, block);

        // the host moves focus into the new block
        self.active += 1;
        self.caret_node = 0;
        self.caret_offset = 0;
        self.status = "segment split".to_string();
    }

    /// Native (un-intercepted) editing: mutate the node's surface text.
    fn type_char(&mut self, c: char) {
        let (text, lead) = self.caret_surface();
        let at = lead + self.caret_offset;
        let byte = char_byte(&text, at);
        let mut updated = text;
        updated.insert(byte, c);

        let node = self.caret_node;
        self.active_block_mut().set_node_text(node, updated);
        self.caret_offset += 1;
    }

    fn native_backspace(&mut self) {
        if self.caret_offset == 0 {
            return;
        }
        let (text, lead) = self.caret_surface();
        let at = lead + self.caret_offset - 1;
        let byte = char_byte(&text, at);
        let mut updated = text;
        updated.remove(byte);

        let node = self.caret_node;
        self.active_block_mut().set_node_text(node, updated);
        self.caret_offset -= 1;
    }

    fn native_delete(&mut self) {
        let (text, lead) = self.caret_surface();
        let at = lead + self.caret_offset;
        if at >= char_len(&text) {
            return;
        }
        let byte = char_byte(&text, at);
        let mut updated = text;
        updated.remove(byte);

        let node = self.caret_node;
        self.active_block_mut().set_node_text(node, updated);
    }

    fn pick_speaker(&mut self, digit: usize) {
        let list = speakers();
        let Some(speaker) = list.get(digit.saturating_sub(1)) else {
            return;
        };
        let payload = serde_json::to_string(speaker).unwrap_or_default();

        match self.active_block_mut().pick_speaker(&payload) {
            EditOutcome::SpeakerChangeRequested { speaker } => {
                self.status = format!("speaker → {}", speaker.name);
            }
            _ => {
                self.status = "speaker unchanged".to_string();
            }
        }
    }
}

fn char_byte(text: &str, at_chars: usize) -> usize {
    text.char_indices()
        .nth(at_chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

fn main() {
    use clap::Parser;
    let args = Args::parse();
    let fixture_name = args.fixture.to_string();
    let segments = args.fixture.segments();

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, segments, fixture_name);
    ratatui::restore();

    match result {
        Ok(app) => {
            println!(
                "Done. {} segments, {} words in the active one.",
                app.blocks.len(),
                app.active_block().view().extract().len(),
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    segments: Vec<SegmentData>,
    fixture_name: String,
) -> std::io::Result<App> {
    let mut app = App::new(segments, fixture_name);

    loop {
        terminal.draw(|frame| renderer::render(frame, &app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if app.active_block().picker().is_open() {
            match key.code {
                KeyCode::Esc => app.active_block_mut().close_speaker_picker(),
                KeyCode::Char(c @ '1'..='9') => {
                    app.pick_speaker(c as usize - '0' as usize)
                }
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') if ctrl => break,
            KeyCode::Char('p') if ctrl => app.active_block_mut().open_speaker_picker(),
            KeyCode::Char('a') if ctrl => {
                app.command(EditCommand::SelectAll);
            }
            KeyCode::Up => app.switch_block(-1),
            KeyCode::Down => app.switch_block(1),
            KeyCode::Left => app.move_left(),
            KeyCode::Right => app.move_right(),
            KeyCode::Enter => {
                app.command(EditCommand::Enter {
                    split_segment: ctrl,
                });
            }
            KeyCode::Backspace => {
                if app.command(EditCommand::Backspace) == EditOutcome::PassThrough {
                    app.native_backspace();
                }
                app.select_all = false;
            }
            KeyCode::Delete => {
                if app.command(EditCommand::Delete) == EditOutcome::PassThrough {
                    app.native_delete();
                }
                app.select_all = false;
            }
            KeyCode::Char(' ') => {
                if app.command(EditCommand::Whitespace) == EditOutcome::PassThrough {
                    app.type_char(' ');
                }
                app.select_all = false;
            }
            KeyCode::Char(c) => {
                app.type_char(c);
                app.select_all = false;
            }
            _ => {}
        }
    }

    Ok(app)
}
