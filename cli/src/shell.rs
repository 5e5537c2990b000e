//! Interactive loop: reads commands, drives the controller, prints views.

use std::io::{self, BufRead, Write};

use task_core::{App, HealthCheck, ListIntent, TaskForm, TaskId, Transport};
use tracing::debug;

use crate::render;

const HELP: &str = "\
commands:
  list | ls        show tasks
  add              create a task (prompts for title and description)
  toggle <id>      flip completion
  delete | rm <id> delete a task
  reload           fetch tasks again
  health           check API status
  help             this text
  quit | exit      leave
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    List,
    Add,
    Intent(ListIntent),
    Reload,
    Health,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(ShellCommand::Empty);
    };
    let command = match head {
        "list" | "ls" => ShellCommand::List,
        "add" => ShellCommand::Add,
        "toggle" => ShellCommand::Intent(ListIntent::Toggle(parse_id(head, words.next())?)),
        "delete" | "rm" => ShellCommand::Intent(ListIntent::Delete(parse_id(head, words.next())?)),
        "reload" => ShellCommand::Reload,
        "health" => ShellCommand::Health,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command `{other}`, try `help`")),
    };
    match words.next() {
        Some(extra) => Err(format!("unexpected argument `{extra}` for `{head}`")),
        None => Ok(command),
    }
}

fn parse_id(command: &str, word: Option<&str>) -> Result<TaskId, String> {
    let word = word.ok_or_else(|| format!("`{command}` needs a task id"))?;
    word.parse().map_err(|_| format!("`{word}` is not a task id"))
}

pub struct Shell<'a, T: Transport + ?Sized> {
    app: App,
    form: TaskForm,
    health: HealthCheck,
    transport: &'a mut T,
}

impl<'a, T: Transport + ?Sized> Shell<'a, T> {
    pub fn new(app: App, health: HealthCheck, transport: &'a mut T) -> Self {
        Self {
            app,
            form: TaskForm::new(),
            health,
            transport,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Mounts the app, then serves commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        self.app.load_tasks(self.transport);
        output.write_all(render::app(&self.app).as_bytes())?;

        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(line) = read_line(&mut input)? else {
                return Ok(());
            };
            let command = match parse(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(output, "{message}")?;
                    continue;
                }
            };
            debug!(?command, "shell command");
            match command {
                ShellCommand::Empty => {}
                ShellCommand::List => output.write_all(render::app(&self.app).as_bytes())?,
                ShellCommand::Add => {
                    if !self.fill_form(&mut input, &mut output)? {
                        return Ok(());
                    }
                    if let Some(request) = self.form.submit() {
                        self.app.create_task(self.transport, &request);
                        output.write_all(render::app(&self.app).as_bytes())?;
                    }
                }
                ShellCommand::Intent(intent) => {
                    self.app.handle_intent(self.transport, intent);
                    output.write_all(render::app(&self.app).as_bytes())?;
                }
                ShellCommand::Reload => {
                    self.app.load_tasks(self.transport);
                    output.write_all(render::app(&self.app).as_bytes())?;
                }
                ShellCommand::Health => {
                    self.health.check(self.transport);
                    output.write_all(render::health(&self.health).as_bytes())?;
                }
                ShellCommand::Help => output.write_all(HELP.as_bytes())?,
                ShellCommand::Quit => return Ok(()),
            }
        }
    }

    /// Prompts for both form fields. Returns `false` at end of input.
    fn fill_form<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> io::Result<bool> {
        write!(output, "title: ")?;
        output.flush()?;
        let Some(title) = read_line(input)? else {
            return Ok(false);
        };
        self.form.set_title(title);

        write!(output, "description (optional): ")?;
        output.flush()?;
        let Some(description) = read_line(input)? else {
            return Ok(false);
        };
        self.form.set_description(description);
        Ok(true)
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use task_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, TaskClient, DEFAULT_OWNER_ID};

    #[test]
    fn parses_commands() {
        assert_eq!(parse("   "), Ok(ShellCommand::Empty));
        assert_eq!(parse("ls"), Ok(ShellCommand::List));
        assert_eq!(parse("toggle 4"), Ok(ShellCommand::Intent(ListIntent::Toggle(4))));
        assert_eq!(parse("rm 9"), Ok(ShellCommand::Intent(ListIntent::Delete(9))));
        assert_eq!(parse("exit"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse("toggle").unwrap_err().contains("needs a task id"));
        assert!(parse("delete abc").unwrap_err().contains("not a task id"));
        assert!(parse("list now").unwrap_err().contains("unexpected argument"));
        assert!(parse("frobnicate").unwrap_err().contains("unknown command"));
    }

    struct Replay {
        responses: VecDeque<(u16, &'static str)>,
        requests: Vec<HttpRequest>,
    }

    impl Transport for Replay {
        fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.push(request.clone());
            let (status, body) = self
                .responses
                .pop_front()
                .ok_or_else(|| ApiError::Transport("no more responses".into()))?;
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            })
        }
    }

    fn run(script: &str, responses: Vec<(u16, &'static str)>) -> (String, Replay, Vec<i64>) {
        let mut transport = Replay {
            responses: responses.into(),
            requests: Vec::new(),
        };
        let client = TaskClient::new("http://api.test");
        let mut output = Vec::new();
        let ids = {
            let mut shell = Shell::new(
                App::new(client.clone(), DEFAULT_OWNER_ID),
                HealthCheck::new(client),
                &mut transport,
            );
            shell.run(script.as_bytes(), &mut output).unwrap();
            shell.app().tasks().iter().map(|t| t.id).collect()
        };
        (String::from_utf8(output).unwrap(), transport, ids)
    }

    #[test]
    fn add_goes_through_the_form() {
        let (output, transport, ids) = run(
            "add\nWrite docs\n\nquit\n",
            vec![
                (200, "[]"),
                (201, r#"{"id":3,"title":"Write docs","owner_id":1,"completed":false}"#),
            ],
        );
        assert_eq!(ids, vec![3]);
        assert_eq!(transport.requests[1].method, HttpMethod::Post);
        assert_eq!(
            transport.requests[1].body.as_deref(),
            Some(r#"{"title":"Write docs","completed":false}"#)
        );
        assert!(output.contains("[ ]    3  Write docs"));
    }

    #[test]
    fn blank_title_sends_nothing() {
        let (_, transport, ids) = run("add\n   \nignored\n", vec![(200, "[]")]);
        assert!(ids.is_empty());
        assert_eq!(transport.requests.len(), 1);
    }

    #[test]
    fn toggle_and_delete_by_id() {
        let (_, transport, ids) = run(
            "toggle 1\nrm 2\n",
            vec![
                (
                    200,
                    r#"[{"id":1,"title":"A","completed":false},{"id":2,"title":"B","completed":false}]"#,
                ),
                (200, r#"{"id":1,"title":"A","completed":true}"#),
                (204, ""),
            ],
        );
        assert_eq!(ids, vec![1]);
        assert_eq!(transport.requests[1].path, "http://api.test/api/v1/tasks/1");
        assert_eq!(transport.requests[2].method, HttpMethod::Delete);
    }

    #[test]
    fn health_and_errors_are_printed() {
        let (output, _, _) = run("health\nfrobnicate\n", vec![(500, "boom"), (200, r#"{"status":"ok"}"#)]);
        assert!(output.contains("! Failed to load tasks"));
        assert!(output.contains("Status: ok"));
        assert!(output.contains("unknown command `frobnicate`"));
    }
}
