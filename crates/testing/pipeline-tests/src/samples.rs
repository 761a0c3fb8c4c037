//! Ready-made graphs for the documented scenarios

use crate::{APP, CORE, GraphFixture, TypeFixture, app, system};
use tb_symbols::{Parameter, ParameterModifier};
use tb_types::TypeReference;

/// `Pair` implementing `IEquatable<Pair>` and `IFormattable`
#[must_use]
pub fn pair() -> GraphFixture {
    GraphFixture::new()
        .with_system_interface("IEquatable", 1)
        .with_system_interface("IFormattable", 0)
        .with(
            TypeFixture::structure("App.Pair")
                .implements(TypeReference::generic(CORE, "System", "IEquatable", vec![app("App", "Pair")]))
                .implements(system("IFormattable"))
                .constructor(Vec::new())
                .method("Swap", app("App", "Pair")),
        )
}

/// `Box` with an `int Value` and an explicit `IBox.Value` returning `object`
#[must_use]
pub fn boxed() -> GraphFixture {
    GraphFixture::new().with(
        TypeFixture::class("App.Box")
            .property("Value", system("Int32"))
            .property_with("Value", system("Object"), |info| {
                info.explicit_interface = Some(app("App", "IBox"));
            }),
    )
}

/// `Reader` with `Read(int)` and `Read(ref int)`
#[must_use]
pub fn reader() -> GraphFixture {
    GraphFixture::new().with(
        TypeFixture::class("App.Reader")
            .method_with(
                "Read",
                vec![Parameter::new("value", system("Int32"))],
                system("Void"),
                |_| {},
            )
            .method_with(
                "Read",
                vec![Parameter::new("value", system("Int32").by_ref()).with_modifier(ParameterModifier::Ref)],
                system("Void"),
                |_| {},
            ),
    )
}

/// `Store` with a public `Dispose` and an explicit `IDisposable.Dispose`
#[must_use]
pub fn store() -> GraphFixture {
    GraphFixture::new().with(
        TypeFixture::class("App.Store")
            .method("Dispose", system("Void"))
            .explicit_method(&system("IDisposable"), "Dispose", system("Void")),
    )
}

/// `Query` whose members are named after target keywords
#[must_use]
pub fn keywords() -> GraphFixture {
    GraphFixture::new().with(
        TypeFixture::class("App.Query")
            .method("delete", system("Void"))
            .property("class", system("String"))
            .field("new", system("Int32")),
    )
}

/// Every sample above plus cross-namespace references and colliding names
#[must_use]
pub fn everything() -> GraphFixture {
    let mut all = GraphFixture::new();
    for sample in [pair(), boxed(), reader(), store(), keywords()] {
        all = all.merged(sample);
    }
    all.with(TypeFixture::interface("App.ICollection"))
        .with(TypeFixture::interface("App.IList").implements(app("App", "ICollection")))
        .with(
            TypeFixture::class("App.Bag")
                .implements(app("App", "IList"))
                .implements(app("App", "ICollection"))
                .field("Value", system("Int32"))
                .method("Value", system("Void"))
                .property("Value", system("String")),
        )
        .with(TypeFixture::class("App.Model.Item").property("Label", system("String")))
        .with(TypeFixture::class("App.Ui.Item"))
        .with(
            TypeFixture::class("App.Ui.Panel")
                .property("Selected", TypeReference::named(APP, "App.Model", "Item"))
                .property("Bag", app("App", "Bag")),
        )
}
