//! Syntactic semantic model tests: base-list resolution through usings,
//! aliases and enclosing namespaces, generic substitution, and
//! implementation lookup.

use std::path::Path;
use std::sync::Arc;

use mefguard_analysis::declarations::{DeclarationIndex, MethodLike};
use mefguard_analysis::parsers::{CSharpParser, LanguageParser};
use mefguard_analysis::semantic::syntactic::split_type_arguments;
use mefguard_analysis::semantic::{InterfaceCatalog, SemanticModel, SyntacticModel};
use mefguard_analysis::SyntaxTree;

const SHELL: &str = r#"
namespace Microsoft.VisualStudio.Shell
{
    public interface IVsCallback
    {
        void OnIdle();
        int OnEvent(int code, string name);
    }

    public interface IVsMap<TKey, TValue>
    {
        void Put(TKey key, List<TValue> values);
    }
}
"#;

fn tree(source: &str) -> SyntaxTree {
    CSharpParser::new()
        .parse(source, Path::new("Demo.cs"))
        .unwrap()
        .tree
}

fn model_for(trees: &[&SyntaxTree]) -> SyntacticModel {
    SyntacticModel::new(Arc::new(InterfaceCatalog::from_trees(trees.iter().copied())))
}

fn interface_names(source: &str) -> Vec<String> {
    let shell = tree(SHELL);
    let unit = tree(source);
    let model = model_for(&[&shell, &unit]);
    let index = DeclarationIndex::build(&unit);
    index
        .classes
        .iter()
        .flat_map(|c| model.declared_interfaces(c))
        .map(|s| s.display)
        .collect()
}

/// Interfaces are catalogued by qualified name and arity.
#[test]
fn test_catalog_contents() {
    let shell = tree(SHELL);
    let catalog = InterfaceCatalog::from_trees([&shell]);
    assert_eq!(catalog.len(), 2);
    assert!(catalog.contains("Microsoft.VisualStudio.Shell.IVsCallback", 0));
    assert!(catalog.contains("Microsoft.VisualStudio.Shell.IVsMap", 2));
    assert!(!catalog.contains("Microsoft.VisualStudio.Shell.IVsMap", 0));
    let entry = catalog.get("Microsoft.VisualStudio.Shell.IVsCallback", 0).unwrap();
    assert_eq!(entry.members.len(), 2);
    assert_eq!(entry.members[1].parameter_types, vec!["int", "string"]);
}

/// A using directive brings the interface into scope.
#[test]
fn test_resolve_through_using() {
    let names = interface_names(
        "using Microsoft.VisualStudio.Shell;\nclass H : IVsCallback { }\n",
    );
    assert_eq!(names, vec!["Microsoft.VisualStudio.Shell.IVsCallback"]);
}

/// Fully qualified and `global::` names resolve as written.
#[test]
fn test_resolve_qualified() {
    let names = interface_names(
        "class H : Microsoft.VisualStudio.Shell.IVsCallback { }\nclass G : global::Microsoft.VisualStudio.Shell.IVsCallback { }\n",
    );
    assert_eq!(names.len(), 2);
    assert!(names.iter().all(|n| n == "Microsoft.VisualStudio.Shell.IVsCallback"));
}

/// An alias using replaces the head segment of the written name.
#[test]
fn test_resolve_alias() {
    let names = interface_names(
        "using Shell = Microsoft.VisualStudio.Shell;\nclass H : Shell.IVsCallback { }\n",
    );
    assert_eq!(names, vec!["Microsoft.VisualStudio.Shell.IVsCallback"]);
}

/// Enclosing namespaces are searched innermost first.
#[test]
fn test_resolve_enclosing_namespace() {
    let names = interface_names(
        "namespace Microsoft.VisualStudio.Shell.Impl\n{\n    class H : IVsCallback { }\n}\n",
    );
    assert_eq!(names, vec!["Microsoft.VisualStudio.Shell.IVsCallback"]);
}

/// File-scoped namespace declarations qualify interfaces and classes alike.
#[test]
fn test_file_scoped_namespace() {
    let stub = tree("namespace Microsoft.VisualStudio.Editor;\n\npublic interface IVsView\n{\n    void Show();\n}\n");
    let unit = tree("namespace Microsoft.VisualStudio.Editor;\n\nclass V : IVsView { }\n");
    let model = model_for(&[&stub, &unit]);
    let index = DeclarationIndex::build(&unit);
    let symbols = model.declared_interfaces(&index.classes[0]);
    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].fqn, "Microsoft.VisualStudio.Editor.IVsView");
}

/// Base classes and unknown names are not reported as interfaces.
#[test]
fn test_unknown_bases_dropped() {
    let names = interface_names(
        "using Microsoft.VisualStudio.Shell;\nclass H : Control, IDisposable, IVsCallback { }\n",
    );
    assert_eq!(names, vec!["Microsoft.VisualStudio.Shell.IVsCallback"]);
}

/// Type arguments are substituted into member parameter types.
#[test]
fn test_generic_substitution() {
    let shell = tree(SHELL);
    let unit = tree(
        "using Microsoft.VisualStudio.Shell;\nclass M : IVsMap<string, Dictionary<int, T>>\n{\n    public void Put(string key, List<Dictionary<int, T>> values) { Work(); }\n    public void Put(int key, List<int> values) { Work(); }\n}\n",
    );
    let model = model_for(&[&shell, &unit]);
    let index = DeclarationIndex::build(&unit);
    let class = &index.classes[0];
    let symbols = model.declared_interfaces(class);
    assert_eq!(symbols.len(), 1);
    assert_eq!(
        symbols[0].display,
        "Microsoft.VisualStudio.Shell.IVsMap<string, Dictionary<int,T>>"
    );
    let member = &symbols[0].members[0];
    assert_eq!(
        member.parameter_types,
        vec!["string", "List<Dictionary<int,T>>"]
    );

    let found = model
        .find_implementation_for_interface_member(class, member)
        .unwrap();
    let first = class.methods()[0].node().id();
    assert_eq!(found, Some(first));
}

/// An explicit implementation wins over a public method of the same shape.
#[test]
fn test_explicit_implementation_preferred() {
    let shell = tree(SHELL);
    let unit = tree(
        "using Microsoft.VisualStudio.Shell;\nclass H : IVsCallback\n{\n    public void OnIdle() { A(); }\n    void IVsCallback.OnIdle() { B(); }\n}\n",
    );
    let model = model_for(&[&shell, &unit]);
    let index = DeclarationIndex::build(&unit);
    let class = &index.classes[0];
    let symbols = model.declared_interfaces(class);
    let on_idle = symbols[0].members.iter().find(|m| m.name == "OnIdle").unwrap();
    let found = model
        .find_implementation_for_interface_member(class, on_idle)
        .unwrap()
        .unwrap();
    let methods = class.methods();
    let explicit = methods
        .iter()
        .find(|m| m.explicit_interface().is_some())
        .unwrap();
    assert_eq!(found, explicit.node().id());
}

/// Static and non-public methods never implement an interface member
/// implicitly.
#[test]
fn test_implicit_requires_public_instance() {
    let shell = tree(SHELL);
    let unit = tree(
        "using Microsoft.VisualStudio.Shell;\nclass H : IVsCallback\n{\n    public static void OnIdle() { A(); }\n    internal void OnIdle() { B(); }\n}\n",
    );
    let model = model_for(&[&shell, &unit]);
    let index = DeclarationIndex::build(&unit);
    let class = &index.classes[0];
    let symbols = model.declared_interfaces(class);
    let on_idle = symbols[0].members.iter().find(|m| m.name == "OnIdle").unwrap();
    assert_eq!(
        model
            .find_implementation_for_interface_member(class, on_idle)
            .unwrap(),
        None
    );
}

/// Parameter types ignore names, default values and whitespace.
#[test]
fn test_parameter_types() {
    let unit = tree("class A\n{\n    void M(ref int  a, List< string > b = null, T[] rest) { }\n}\n");
    let index = DeclarationIndex::build(&unit);
    let methods = index.classes[0].methods();
    let method: &MethodLike<'_> = &methods[0];
    assert_eq!(method.parameter_types(), vec!["refint", "List<string>", "T[]"]);
}

/// Type argument splitting respects nesting.
#[test]
fn test_split_type_arguments() {
    assert_eq!(split_type_arguments("IFoo"), ("IFoo", vec![]));
    let (name, args) = split_type_arguments("Ns.IFoo<int,Dictionary<string,List<int>>>");
    assert_eq!(name, "Ns.IFoo");
    assert_eq!(args, vec!["int", "Dictionary<string,List<int>>"]);
}
