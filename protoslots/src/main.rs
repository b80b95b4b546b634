use clap::{Parser as ClapParser, ValueEnum};
use std::process;

use protoslots::{Object, ObjectCreateInfo, Result, parameter, slots};

#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Demonstrations to run in order
    #[arg(value_enum, help = "Demos to run (all when omitted)")]
    demos: Vec<Demo>,

    #[arg(long, help = "List the available demos and exit")]
    list: bool,

    #[arg(short, long, help = "Trace sends and lookups")]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Demo {
    Evaluate,
    Copy,
    SendMessage,
    SendMessageWithParameters,
    AssignSlot,
    MakeParent,
    AssignParentSlot,
    Render,
}

impl Demo {
    fn run(self) -> Result<String> {
        match self {
            Demo::Evaluate => evaluate(),
            Demo::Copy => Ok(copy()),
            Demo::SendMessage => send_message(),
            Demo::SendMessageWithParameters => send_message_with_parameters(),
            Demo::AssignSlot => assign_slot(),
            Demo::MakeParent => make_parent(),
            Demo::AssignParentSlot => assign_parent_slot(),
            Demo::Render => Ok(render()),
        }
    }

    fn name(self) -> String {
        self.to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_else(|| format!("{self:?}"))
    }
}

fn holding(name: &str, target: Object) -> Object {
    Object::new(ObjectCreateInfo {
        slots: slots([(name, target)]),
        ..Default::default()
    })
}

fn evaluate() -> Result<String> {
    let say = Object::with_value("hi");
    let object = Object::with_messages(["say"], slots([("say", say)]));
    Ok(object.evaluate()?.to_string())
}

fn copy() -> String {
    let original = holding("a", Object::with_value(1));
    let copy = original.copy();
    copy.assign_slot("b", Object::with_value(2));
    format!("{:?} {:?}", original.slot_names(), copy.slot_names())
}

fn send_message() -> Result<String> {
    let object = holding("name", Object::with_value("Alice"));
    Ok(object.send_message("name")?.to_string())
}

fn send_message_with_parameters() -> Result<String> {
    let echo = Object::with_function(|call| parameter(&call));
    let object = holding("echo", echo);
    let argument = Object::with_value("Hello");
    Ok(object.send_message_with_parameters("echo", argument)?.to_string())
}

fn assign_slot() -> Result<String> {
    let object = Object::empty();
    object.assign_slot("n", Object::with_value(7));
    Ok(object.send_message("n")?.to_string())
}

fn make_parent() -> Result<String> {
    let parent = holding("color", Object::with_value("blue"));
    let child = Object::empty();
    child.assign_slot("p", parent);
    child.make_parent("p")?;
    Ok(child.send_message("color")?.to_string())
}

fn assign_parent_slot() -> Result<String> {
    let parent = holding("age", Object::with_value(30));
    let child = Object::empty();
    child.assign_parent_slot("parent", parent)?;
    Ok(child.send_message("age")?.to_string())
}

fn render() -> String {
    holding("x", Object::with_value(1)).render()
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "trace" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .init();

    if cli.list {
        for demo in Demo::value_variants() {
            println!("{}", demo.name());
        }
        return;
    }

    let demos = if cli.demos.is_empty() {
        Demo::value_variants().to_vec()
    } else {
        cli.demos
    };

    for demo in demos {
        match demo.run() {
            Ok(output) => println!("{output}"),
            Err(err) => {
                eprintln!("Error in demo '{}': {}", demo.name(), err);
                process::exit(1);
            }
        }
    }
}
