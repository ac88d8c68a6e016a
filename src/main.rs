use std::{env, fs, process::exit, rc::Rc};

use kappa::{
    ast::stream::Printer,
    binder::scopes::bind,
    comp::Comp,
    display_error,
    emitter::emitter::Emitter,
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    parser::parser::parse,
    Position,
};

static USAGE: &str = "\
Usage: kappa [options] file

Options:
-h, --help                 produce this help message
    --emit-ast             emit the program's AST after binding
    --fancy                use fancy output: the AST dump uses only
                           parentheses where necessary
";

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut comp = Comp::new();
    let mut infile: Option<String> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{}", USAGE);
                return;
            }
            "--emit-ast" => comp.emit_ast = true,
            "--fancy" => comp.fancy = true,
            _ if arg.starts_with('-') => {
                eprintln!("kappa: error: unrecognized command line option '{}'", arg);
                exit(1);
            }
            _ => {
                if infile.is_some() {
                    eprintln!("kappa: error: at the moment there is only one input file supported");
                    exit(1);
                }
                infile = Some(arg.clone());
            }
        }
    }

    let file_path = match infile {
        Some(file_path) => file_path,
        None => {
            eprintln!("kappa: error: no input files");
            exit(1);
        }
    };

    if !file_path.ends_with(".kp") {
        eprintln!(
            "kappa: error: input file '{}' does not have '.kp' extension",
            file_path
        );
        exit(1);
    }

    let bytes = match fs::read(&file_path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("kappa: error: cannot read '{}': {}", file_path, err);
            exit(1);
        }
    };

    // malformed UTF-8 is reported but does not stop the pipeline
    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(err) => {
            let source = String::from_utf8_lossy(err.as_bytes()).into_owned();
            comp.err(
                Position(0, Rc::new(file_path.clone())),
                ErrorImpl::InvalidUtf8,
            );
            source
        }
    };

    let tokens = tokenize(&mut comp, &source, Some(file_path.clone()));
    let prg = parse(&mut comp, tokens, Rc::new(file_path.clone()));
    let resolutions = bind(&mut comp, &prg);

    for diagnostic in comp.diagnostics() {
        display_error(diagnostic, &source);
    }

    if comp.emit_ast {
        let mut printer = Printer::new(&comp);
        prg.stream(&mut printer);
        print!("{}", printer.finish());
    }

    if comp.num_errors() > 0 {
        exit(1);
    }

    let mut emitter = Emitter::new(&comp, &resolutions);
    emitter.emit_prg(&prg);
}
