//! Syntax tree produced by the parser.
//!
//! The tree is a generic shape: every node names the construct it stands for
//! and may carry a textual token and a source span. It is built by walking
//! the `syn` file with a visitor that keeps the open nodes on a stack.

use serde::Serialize;
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{
    BinOp, Expr, ForeignItem, GenericParam, ImplItem, Item, Lit, Pat, TraitItem, Type, UnOp,
};

/// A line/column location. Lines start at 1, columns at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Source range covered by a node or a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Converts a lexer span. Call-site spans, found on synthesized tokens and
    /// on errors at the end of the input, do not point into the parsed source
    /// and yield `None`.
    pub fn from_proc_macro(span: proc_macro2::Span) -> Option<Self> {
        if span.byte_range().is_empty() && span.source_text().is_none() {
            return None;
        }
        let start = span.start();
        let end = span.end();
        Some(Self {
            start: Position {
                line: start.line,
                column: start.column,
            },
            end: Position {
                line: end.line,
                column: end.column,
            },
        })
    }
}

/// One node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: &'static str, token: Option<String>, span: Option<Span>) -> Self {
        Self {
            kind,
            token,
            span,
            children: Vec::new(),
        }
    }

    /// Iterates over this node and all of its descendants in pre-order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`Node::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Builds the tree for a parsed file.
pub fn build_tree(file: &syn::File) -> Node {
    let mut builder = TreeBuilder {
        root: Node::new("File", None, Span::from_proc_macro(file.span())),
        stack: Vec::new(),
    };
    visit::visit_file(&mut builder, file);
    builder.root
}

struct TreeBuilder {
    root: Node,
    /// Nodes entered but not yet left, innermost last.
    stack: Vec<Node>,
}

impl TreeBuilder {
    fn wrap(
        &mut self,
        kind: &'static str,
        token: Option<String>,
        span: proc_macro2::Span,
        walk: impl FnOnce(&mut Self),
    ) {
        self.stack.push(Node::new(kind, token, Span::from_proc_macro(span)));
        walk(self);
        self.leave();
    }

    fn leaf(&mut self, kind: &'static str, token: Option<String>, span: proc_macro2::Span) {
        self.wrap(kind, token, span, |_| {});
    }

    fn leave(&mut self) {
        if let Some(node) = self.stack.pop() {
            match self.stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => self.root.children.push(node),
            }
        }
    }
}

impl<'ast> Visit<'ast> for TreeBuilder {
    fn visit_item(&mut self, i: &'ast Item) {
        let (kind, name) = item_kind(i);
        self.wrap(kind, name, i.span(), |v| visit::visit_item(v, i));
    }

    fn visit_impl_item(&mut self, i: &'ast ImplItem) {
        let (kind, name) = match i {
            ImplItem::Const(c) => ("ImplItemConst", Some(c.ident.to_string())),
            ImplItem::Fn(f) => ("ImplItemFn", Some(f.sig.ident.to_string())),
            ImplItem::Type(t) => ("ImplItemType", Some(t.ident.to_string())),
            ImplItem::Macro(_) => ("ImplItemMacro", None),
            _ => ("ImplItem", None),
        };
        self.wrap(kind, name, i.span(), |v| visit::visit_impl_item(v, i));
    }

    fn visit_trait_item(&mut self, i: &'ast TraitItem) {
        let (kind, name) = match i {
            TraitItem::Const(c) => ("TraitItemConst", Some(c.ident.to_string())),
            TraitItem::Fn(f) => ("TraitItemFn", Some(f.sig.ident.to_string())),
            TraitItem::Type(t) => ("TraitItemType", Some(t.ident.to_string())),
            TraitItem::Macro(_) => ("TraitItemMacro", None),
            _ => ("TraitItem", None),
        };
        self.wrap(kind, name, i.span(), |v| visit::visit_trait_item(v, i));
    }

    fn visit_foreign_item(&mut self, i: &'ast ForeignItem) {
        let (kind, name) = match i {
            ForeignItem::Fn(f) => ("ForeignItemFn", Some(f.sig.ident.to_string())),
            ForeignItem::Static(s) => ("ForeignItemStatic", Some(s.ident.to_string())),
            ForeignItem::Type(t) => ("ForeignItemType", Some(t.ident.to_string())),
            ForeignItem::Macro(_) => ("ForeignItemMacro", None),
            _ => ("ForeignItem", None),
        };
        self.wrap(kind, name, i.span(), |v| visit::visit_foreign_item(v, i));
    }

    fn visit_expr(&mut self, e: &'ast Expr) {
        let (kind, token) = expr_kind(e);
        self.wrap(kind, token, e.span(), |v| visit::visit_expr(v, e));
    }

    fn visit_pat(&mut self, p: &'ast Pat) {
        let (kind, token) = match p {
            Pat::Const(_) => ("PatConst", None),
            Pat::Ident(i) => ("PatIdent", Some(i.ident.to_string())),
            Pat::Lit(_) => ("PatLit", None),
            Pat::Macro(_) => ("PatMacro", None),
            Pat::Or(_) => ("PatOr", None),
            Pat::Paren(_) => ("PatParen", None),
            Pat::Path(_) => ("PatPath", None),
            Pat::Range(_) => ("PatRange", None),
            Pat::Reference(_) => ("PatReference", None),
            Pat::Rest(_) => ("PatRest", None),
            Pat::Slice(_) => ("PatSlice", None),
            Pat::Struct(_) => ("PatStruct", None),
            Pat::Tuple(_) => ("PatTuple", None),
            Pat::TupleStruct(_) => ("PatTupleStruct", None),
            Pat::Type(_) => ("PatType", None),
            Pat::Wild(_) => ("PatWild", Some("_".to_string())),
            _ => ("Pat", None),
        };
        self.wrap(kind, token, p.span(), |v| visit::visit_pat(v, p));
    }

    fn visit_type(&mut self, t: &'ast Type) {
        let kind = match t {
            Type::Array(_) => "TypeArray",
            Type::BareFn(_) => "TypeBareFn",
            Type::Group(_) => "TypeGroup",
            Type::ImplTrait(_) => "TypeImplTrait",
            Type::Infer(_) => "TypeInfer",
            Type::Macro(_) => "TypeMacro",
            Type::Never(_) => "TypeNever",
            Type::Paren(_) => "TypeParen",
            Type::Path(_) => "TypePath",
            Type::Ptr(_) => "TypePtr",
            Type::Reference(_) => "TypeReference",
            Type::Slice(_) => "TypeSlice",
            Type::TraitObject(_) => "TypeTraitObject",
            Type::Tuple(_) => "TypeTuple",
            _ => "Type",
        };
        self.wrap(kind, None, t.span(), |v| visit::visit_type(v, t));
    }

    fn visit_local(&mut self, l: &'ast syn::Local) {
        self.wrap("Local", None, l.span(), |v| visit::visit_local(v, l));
    }

    fn visit_block(&mut self, b: &'ast syn::Block) {
        self.wrap("Block", None, b.span(), |v| visit::visit_block(v, b));
    }

    fn visit_arm(&mut self, a: &'ast syn::Arm) {
        self.wrap("Arm", None, a.span(), |v| visit::visit_arm(v, a));
    }

    fn visit_field(&mut self, f: &'ast syn::Field) {
        let name = f.ident.as_ref().map(ToString::to_string);
        self.wrap("Field", name, f.span(), |v| visit::visit_field(v, f));
    }

    fn visit_field_value(&mut self, f: &'ast syn::FieldValue) {
        self.wrap("FieldValue", None, f.span(), |v| {
            visit::visit_field_value(v, f)
        });
    }

    fn visit_variant(&mut self, var: &'ast syn::Variant) {
        let name = Some(var.ident.to_string());
        self.wrap("Variant", name, var.span(), |v| visit::visit_variant(v, var));
    }

    fn visit_generic_param(&mut self, g: &'ast GenericParam) {
        let (kind, name) = match g {
            GenericParam::Type(t) => ("TypeParam", t.ident.to_string()),
            GenericParam::Lifetime(l) => ("LifetimeParam", l.lifetime.to_string()),
            GenericParam::Const(c) => ("ConstParam", c.ident.to_string()),
        };
        self.wrap(kind, Some(name), g.span(), |v| {
            visit::visit_generic_param(v, g)
        });
    }

    fn visit_receiver(&mut self, r: &'ast syn::Receiver) {
        self.wrap("SelfParam", None, r.span(), |v| visit::visit_receiver(v, r));
    }

    fn visit_use_glob(&mut self, g: &'ast syn::UseGlob) {
        self.leaf("UseGlob", Some("*".to_string()), g.span());
    }

    // Attribute and macro bodies are opaque token streams; only their path
    // is recorded.
    fn visit_attribute(&mut self, a: &'ast syn::Attribute) {
        self.leaf("Attribute", Some(path_to_string(a.path())), a.span());
    }

    fn visit_macro(&mut self, m: &'ast syn::Macro) {
        self.leaf("Macro", Some(path_to_string(&m.path)), m.span());
    }

    fn visit_lifetime(&mut self, l: &'ast syn::Lifetime) {
        self.leaf("Lifetime", Some(l.to_string()), l.span());
    }

    fn visit_ident(&mut self, i: &'ast proc_macro2::Ident) {
        self.leaf("Ident", Some(i.to_string()), i.span());
    }

    fn visit_lit(&mut self, l: &'ast Lit) {
        let (kind, token) = match l {
            Lit::Str(s) => ("LitStr", s.token().to_string()),
            Lit::ByteStr(s) => ("LitByteStr", s.token().to_string()),
            Lit::CStr(s) => ("LitCStr", s.token().to_string()),
            Lit::Byte(b) => ("LitByte", b.token().to_string()),
            Lit::Char(c) => ("LitChar", c.token().to_string()),
            Lit::Int(i) => ("LitInt", i.token().to_string()),
            Lit::Float(f) => ("LitFloat", f.token().to_string()),
            Lit::Bool(b) => ("LitBool", b.value.to_string()),
            Lit::Verbatim(v) => ("Lit", v.to_string()),
            _ => ("Lit", String::new()),
        };
        self.leaf(kind, Some(token), l.span());
    }
}

fn item_kind(item: &Item) -> (&'static str, Option<String>) {
    match item {
        Item::Const(i) => ("ItemConst", Some(i.ident.to_string())),
        Item::Enum(i) => ("ItemEnum", Some(i.ident.to_string())),
        Item::ExternCrate(i) => ("ItemExternCrate", Some(i.ident.to_string())),
        Item::Fn(i) => ("ItemFn", Some(i.sig.ident.to_string())),
        Item::ForeignMod(_) => ("ItemForeignMod", None),
        Item::Impl(_) => ("ItemImpl", None),
        Item::Macro(i) => ("ItemMacro", i.ident.as_ref().map(ToString::to_string)),
        Item::Mod(i) => ("ItemMod", Some(i.ident.to_string())),
        Item::Static(i) => ("ItemStatic", Some(i.ident.to_string())),
        Item::Struct(i) => ("ItemStruct", Some(i.ident.to_string())),
        Item::Trait(i) => ("ItemTrait", Some(i.ident.to_string())),
        Item::TraitAlias(i) => ("ItemTraitAlias", Some(i.ident.to_string())),
        Item::Type(i) => ("ItemType", Some(i.ident.to_string())),
        Item::Union(i) => ("ItemUnion", Some(i.ident.to_string())),
        Item::Use(_) => ("ItemUse", None),
        _ => ("Item", None),
    }
}

fn expr_kind(expr: &Expr) -> (&'static str, Option<String>) {
    match expr {
        Expr::Array(_) => ("ExprArray", None),
        Expr::Assign(_) => ("ExprAssign", Some("=".to_string())),
        Expr::Async(_) => ("ExprAsync", None),
        Expr::Await(_) => ("ExprAwait", None),
        Expr::Binary(b) => ("ExprBinary", bin_op(&b.op).map(str::to_string)),
        Expr::Block(_) => ("ExprBlock", None),
        Expr::Break(_) => ("ExprBreak", None),
        Expr::Call(_) => ("ExprCall", None),
        Expr::Cast(_) => ("ExprCast", None),
        Expr::Closure(_) => ("ExprClosure", None),
        Expr::Const(_) => ("ExprConst", None),
        Expr::Continue(_) => ("ExprContinue", None),
        Expr::Field(f) => ("ExprField", Some(member_to_string(&f.member))),
        Expr::ForLoop(_) => ("ExprForLoop", None),
        Expr::Group(_) => ("ExprGroup", None),
        Expr::If(_) => ("ExprIf", None),
        Expr::Index(_) => ("ExprIndex", None),
        Expr::Infer(_) => ("ExprInfer", None),
        Expr::Let(_) => ("ExprLet", None),
        Expr::Lit(_) => ("ExprLit", None),
        Expr::Loop(_) => ("ExprLoop", None),
        Expr::Macro(_) => ("ExprMacro", None),
        Expr::Match(_) => ("ExprMatch", None),
        Expr::MethodCall(m) => ("ExprMethodCall", Some(m.method.to_string())),
        Expr::Paren(_) => ("ExprParen", None),
        Expr::Path(_) => ("ExprPath", None),
        Expr::Range(_) => ("ExprRange", None),
        Expr::Reference(_) => ("ExprReference", None),
        Expr::Repeat(_) => ("ExprRepeat", None),
        Expr::Return(_) => ("ExprReturn", None),
        Expr::Struct(_) => ("ExprStruct", None),
        Expr::Try(_) => ("ExprTry", None),
        Expr::TryBlock(_) => ("ExprTryBlock", None),
        Expr::Tuple(_) => ("ExprTuple", None),
        Expr::Unary(u) => ("ExprUnary", Some(un_op(&u.op).to_string())),
        Expr::Unsafe(_) => ("ExprUnsafe", None),
        Expr::While(_) => ("ExprWhile", None),
        Expr::Yield(_) => ("ExprYield", None),
        _ => ("Expr", None),
    }
}

fn bin_op(op: &BinOp) -> Option<&'static str> {
    let symbol = match op {
        BinOp::Add(_) => "+",
        BinOp::Sub(_) => "-",
        BinOp::Mul(_) => "*",
        BinOp::Div(_) => "/",
        BinOp::Rem(_) => "%",
        BinOp::And(_) => "&&",
        BinOp::Or(_) => "||",
        BinOp::BitXor(_) => "^",
        BinOp::BitAnd(_) => "&",
        BinOp::BitOr(_) => "|",
        BinOp::Shl(_) => "<<",
        BinOp::Shr(_) => ">>",
        BinOp::Eq(_) => "==",
        BinOp::Lt(_) => "<",
        BinOp::Le(_) => "<=",
        BinOp::Ne(_) => "!=",
        BinOp::Ge(_) => ">=",
        BinOp::Gt(_) => ">",
        BinOp::AddAssign(_) => "+=",
        BinOp::SubAssign(_) => "-=",
        BinOp::MulAssign(_) => "*=",
        BinOp::DivAssign(_) => "/=",
        BinOp::RemAssign(_) => "%=",
        BinOp::BitXorAssign(_) => "^=",
        BinOp::BitAndAssign(_) => "&=",
        BinOp::BitOrAssign(_) => "|=",
        BinOp::ShlAssign(_) => "<<=",
        BinOp::ShrAssign(_) => ">>=",
        _ => return None,
    };
    Some(symbol)
}

fn un_op(op: &UnOp) -> &'static str {
    match op {
        UnOp::Deref(_) => "*",
        UnOp::Not(_) => "!",
        UnOp::Neg(_) => "-",
        _ => "?",
    }
}

fn member_to_string(member: &syn::Member) -> String {
    match member {
        syn::Member::Named(ident) => ident.to_string(),
        syn::Member::Unnamed(index) => index.index.to_string(),
    }
}

fn path_to_string(path: &syn::Path) -> String {
    let segments = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    if path.leading_colon.is_some() {
        format!("::{segments}")
    } else {
        segments
    }
}
