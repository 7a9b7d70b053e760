//! Snapshot tests over small complete programs
//!
//! Whole-file translations pinned as inline snapshots, so any drift in
//! terminator placement or rewrite ordering shows up as a readable diff.

use py2rb::{RewriteTables, Translator};

fn convert(source: &str) -> String {
    let tables = RewriteTables::default();
    Translator::new(&tables)
        .translate_str(source)
        .expect("in-memory translation succeeds")
}

#[test]
fn test_greeter_program() {
    let source = "\
import os
class Greeter(object):
    def __init__(self, name):
        self.name = name
    def greet(self):
        print(\"Hello, %s!\" % (self.name))
g = Greeter(\"World\")
g.greet()
";
    insta::assert_snapshot!(convert(source).trim_end(), @r#"
require 'os'
class Greeter < Object
    def initialize (name)
        @name = name
    end
    def greet
        puts(format("Hello, %s!", @name))
    end
end
g = Greeter.new("World")
g.greet()
"#);
}

#[test]
fn test_exception_handling_program() {
    let source = "\
def load(path):
    try:
        fh = open(path)
    except IOError as e:
        print(e)
        raise RuntimeError(e)
    return fh
";
    insta::assert_snapshot!(convert(source).trim_end(), @r#"
def load (path)
    begin
        fh = open(path)
    rescue IOError => e
        puts(e)
        raise RuntimeError.new(e)
    end
    return fh
end
"#);
}
