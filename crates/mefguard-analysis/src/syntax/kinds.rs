//! C# node and token kind names, as produced by tree-sitter-c-sharp.

pub const COMPILATION_UNIT: &str = "compilation_unit";
pub const NAMESPACE_DECLARATION: &str = "namespace_declaration";
pub const FILE_SCOPED_NAMESPACE_DECLARATION: &str = "file_scoped_namespace_declaration";
pub const DECLARATION_LIST: &str = "declaration_list";
pub const USING_DIRECTIVE: &str = "using_directive";
pub const EXTERN_ALIAS_DIRECTIVE: &str = "extern_alias_directive";

pub const CLASS_DECLARATION: &str = "class_declaration";
pub const INTERFACE_DECLARATION: &str = "interface_declaration";
pub const BASE_LIST: &str = "base_list";

pub const METHOD_DECLARATION: &str = "method_declaration";
pub const CONSTRUCTOR_DECLARATION: &str = "constructor_declaration";
pub const EXPLICIT_INTERFACE_SPECIFIER: &str = "explicit_interface_specifier";
pub const MODIFIER: &str = "modifier";
pub const PARAMETER_LIST: &str = "parameter_list";
pub const PARAMETER: &str = "parameter";
pub const TYPE_PARAMETER_LIST: &str = "type_parameter_list";
pub const TYPE_PARAMETER: &str = "type_parameter";
pub const EQUALS_VALUE_CLAUSE: &str = "equals_value_clause";
pub const ATTRIBUTE_LIST: &str = "attribute_list";
pub const ATTRIBUTE: &str = "attribute";
pub const ARROW_EXPRESSION_CLAUSE: &str = "arrow_expression_clause";

pub const BLOCK: &str = "block";
pub const TRY_STATEMENT: &str = "try_statement";
pub const CATCH_CLAUSE: &str = "catch_clause";
pub const CATCH_DECLARATION: &str = "catch_declaration";
pub const EXPRESSION_STATEMENT: &str = "expression_statement";
pub const INVOCATION_EXPRESSION: &str = "invocation_expression";
pub const MEMBER_ACCESS_EXPRESSION: &str = "member_access_expression";
pub const ARGUMENT_LIST: &str = "argument_list";
pub const ARGUMENT: &str = "argument";

pub const IDENTIFIER: &str = "identifier";
pub const QUALIFIED_NAME: &str = "qualified_name";
pub const GENERIC_NAME: &str = "generic_name";
pub const ALIAS_QUALIFIED_NAME: &str = "alias_qualified_name";
pub const TYPE_ARGUMENT_LIST: &str = "type_argument_list";

pub const STRING_LITERAL: &str = "string_literal";
pub const VERBATIM_STRING_LITERAL: &str = "verbatim_string_literal";
pub const RAW_STRING_LITERAL: &str = "raw_string_literal";
pub const INTERPOLATED_STRING_EXPRESSION: &str = "interpolated_string_expression";
pub const CHARACTER_LITERAL: &str = "character_literal";

pub const COMMENT: &str = "comment";
pub const ERROR: &str = "ERROR";
/// Synthetic token that carries trailing trivia of the file.
pub const END_OF_FILE: &str = "end_of_file";

/// Field names.
pub mod field {
    pub const NAME: &str = "name";
    pub const BODY: &str = "body";
    pub const PARAMETERS: &str = "parameters";
    pub const TYPE: &str = "type";
    pub const QUALIFIER: &str = "qualifier";
    pub const EXPRESSION: &str = "expression";
    pub const FUNCTION: &str = "function";
    pub const ARGUMENTS: &str = "arguments";
}
