//! Common CSDL fixtures for tests.

/// A small sales service exercising most element kinds.
pub const SALES_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<edmx:Edmx Version="4.0" xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx">
  <edmx:DataServices>
    <Schema Namespace="Sales" Alias="S" xmlns="http://docs.oasis-open.org/odata/ns/edm">
      <EntityType Name="Person" Abstract="true">
        <Key><PropertyRef Name="ID"/></Key>
        <Property Name="ID" Type="Edm.Int32" Nullable="false"/>
        <Property Name="Name" Type="Edm.String" MaxLength="100"/>
      </EntityType>
      <EntityType Name="Customer" BaseType="S.Person">
        <Property Name="Tier" Type="Sales.Tier"/>
        <Property Name="Address" Type="Sales.Address"/>
        <NavigationProperty Name="Orders" Type="Collection(Sales.Order)" Partner="Customer"/>
        <Annotation Term="Sales.Label" String="A customer"/>
      </EntityType>
      <EntityType Name="VipCustomer" BaseType="Sales.Customer"/>
      <EntityType Name="Order">
        <Key><PropertyRef Name="OrderID"/></Key>
        <Property Name="OrderID" Type="Edm.Int32" Nullable="false"/>
        <Property Name="CustomerID" Type="Edm.Int32"/>
        <Property Name="Tags" Type="Collection(Edm.String)" Nullable="false"/>
        <NavigationProperty Name="Customer" Type="Sales.Customer" Nullable="false" Partner="Orders">
          <ReferentialConstraint Property="CustomerID" ReferencedProperty="ID"/>
          <OnDelete Action="Cascade"/>
        </NavigationProperty>
      </EntityType>
      <ComplexType Name="Address">
        <Property Name="City" Type="Edm.String"/>
      </ComplexType>
      <EnumType Name="Tier">
        <Member Name="Bronze"/>
        <Member Name="Silver"/>
        <Member Name="Gold" Value="10"/>
        <Member Name="Platinum"/>
      </EnumType>
      <TypeDefinition Name="Money" UnderlyingType="Edm.Decimal" Precision="18" Scale="2"/>
      <Term Name="Label" Type="Edm.String" AppliesTo="EntityType Property"/>
      <Term Name="Level" Type="Sales.Tier"/>
      <Function Name="TopOrders" IsBound="true">
        <Parameter Name="customer" Type="Sales.Customer"/>
        <Parameter Name="count" Type="Edm.Int32"/>
        <ReturnType Type="Collection(Sales.Order)"/>
      </Function>
      <Function Name="TopOrders" IsBound="true">
        <Parameter Name="customers" Type="Collection(Sales.Customer)"/>
        <ReturnType Type="Collection(Sales.Order)"/>
      </Function>
      <Function Name="BestCustomer">
        <ReturnType Type="Sales.Customer"/>
      </Function>
      <Action Name="Ship" IsBound="true">
        <Parameter Name="order" Type="Sales.Order"/>
      </Action>
      <Action Name="Reset"/>
      <EntityContainer Name="Container">
        <EntitySet Name="Customers" EntityType="Sales.Customer">
          <NavigationPropertyBinding Path="Orders" Target="Orders"/>
        </EntitySet>
        <EntitySet Name="Orders" EntityType="Sales.Order">
          <NavigationPropertyBinding Path="Customer" Target="Customers"/>
        </EntitySet>
        <Singleton Name="Best" Type="Sales.VipCustomer">
          <NavigationPropertyBinding Path="Orders" Target="Orders"/>
        </Singleton>
        <FunctionImport Name="GetBest" Function="Sales.BestCustomer" EntitySet="Customers"/>
        <ActionImport Name="ResetAll" Action="Sales.Reset"/>
      </EntityContainer>
      <Annotations Target="Sales.Customer/Name">
        <Annotation Term="Sales.Label" String="Full name"/>
      </Annotations>
      <Annotations Target="S.Tier/Gold">
        <Annotation Term="S.Label" String="Top"/>
      </Annotations>
      <Annotations Target="Sales.TopOrders(Sales.Customer)/count" Qualifier="Ui">
        <Annotation Term="Sales.Label" String="How many"/>
      </Annotations>
      <Annotations Target="Sales.Container/Customers">
        <Annotation Term="Sales.Level" EnumMember="Sales.Tier/Gold"/>
      </Annotations>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;

/// The structural part of [`SALES_XML`] in the JSON representation.
pub const SALES_JSON: &str = r##"{
  "$Version": "4.01",
  "$EntityContainer": "Sales.Container",
  "Sales": {
    "$Alias": "S",
    "Person": {
      "$Kind": "EntityType",
      "$Abstract": true,
      "$Key": ["ID"],
      "ID": { "$Type": "Edm.Int32", "$Nullable": false },
      "Name": { "$MaxLength": 100 }
    },
    "Customer": {
      "$Kind": "EntityType",
      "$BaseType": "S.Person",
      "Tier": { "$Type": "Sales.Tier" },
      "Address": { "$Type": "Sales.Address" },
      "Orders": { "$Kind": "NavigationProperty", "$Type": "Sales.Order", "$Collection": true, "$Partner": "Customer" }
    },
    "VipCustomer": { "$Kind": "EntityType", "$BaseType": "Sales.Customer" },
    "Order": {
      "$Kind": "EntityType",
      "$Key": ["OrderID"],
      "OrderID": { "$Type": "Edm.Int32", "$Nullable": false },
      "CustomerID": { "$Type": "Edm.Int32" },
      "Tags": { "$Collection": true, "$Nullable": false },
      "Customer": {
        "$Kind": "NavigationProperty", "$Type": "Sales.Customer", "$Nullable": false, "$Partner": "Orders",
        "$ReferentialConstraint": { "CustomerID": "ID" }
      }
    },
    "Address": { "$Kind": "ComplexType", "City": {} },
    "Tier": { "$Kind": "EnumType", "Bronze": 0, "Silver": 1, "Gold": 10, "Platinum": 11 },
    "Label": { "$Kind": "Term", "$AppliesTo": ["EntityType", "Property"] },
    "TopOrders": [
      { "$Kind": "Function", "$IsBound": true,
        "$Parameter": [
          { "$Name": "customer", "$Type": "Sales.Customer" },
          { "$Name": "count", "$Type": "Edm.Int32" }
        ],
        "$ReturnType": { "$Type": "Sales.Order", "$Collection": true } },
      { "$Kind": "Function", "$IsBound": true,
        "$Parameter": [{ "$Name": "customers", "$Type": "Sales.Customer", "$Collection": true }],
        "$ReturnType": { "$Type": "Sales.Order", "$Collection": true } }
    ],
    "Container": {
      "$Kind": "EntityContainer",
      "Customers": { "$Collection": true, "$Type": "Sales.Customer",
                     "$NavigationPropertyBinding": { "Orders": "Orders" } },
      "Orders": { "$Collection": true, "$Type": "Sales.Order",
                  "$NavigationPropertyBinding": { "Customer": "Customers" } }
    }
  }
}"##;

/// Two schemas declaring the same type name in the same namespace.
pub const DUPLICATE_TYPE_XML: &str = r#"<edmx:Edmx Version="4.0" xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx">
  <edmx:DataServices>
    <Schema Namespace="Dup" xmlns="http://docs.oasis-open.org/odata/ns/edm">
      <ComplexType Name="Thing"/>
      <ComplexType Name="Holder">
        <Property Name="Value" Type="Dup.Thing"/>
      </ComplexType>
    </Schema>
    <Schema Namespace="Dup" xmlns="http://docs.oasis-open.org/odata/ns/edm">
      <EntityType Name="Thing"/>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;

/// Names that point nowhere.
pub const BROKEN_XML: &str = r#"<Schema Namespace="Broken" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <EntityType Name="Widget" BaseType="Broken.Missing">
    <Key><PropertyRef Name="Nope"/></Key>
    <Property Name="Shape" Type="Broken.Shape"/>
    <NavigationProperty Name="Parts" Type="Collection(Broken.Part)" Partner="Owner"/>
  </EntityType>
  <Function Name="Measure">
    <Parameter Name="widget" Type="Broken.Widget"/>
    <ReturnType Type="Other.Size"/>
  </Function>
  <EntityContainer Name="Service" Extends="Broken.Base">
    <EntitySet Name="Widgets" EntityType="Broken.Widget">
      <NavigationPropertyBinding Path="Parts" Target="Parts"/>
    </EntitySet>
    <FunctionImport Name="Run" Function="Broken.Run"/>
  </EntityContainer>
  <Annotations Target="Broken.Nowhere">
    <Annotation Term="Broken.Label" String="lost"/>
  </Annotations>
  <Annotations Target="Broken.Widget">
    <Annotation Term="Broken.Note" EnumMember="Broken.Color"/>
  </Annotations>
</Schema>"#;

/// A base type chain that loops back on itself.
pub const CYCLE_XML: &str = r#"<Schema Namespace="Loop" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <EntityType Name="A" BaseType="Loop.B"/>
  <EntityType Name="B" BaseType="Loop.A"/>
  <EntityType Name="C" BaseType="Loop.A"/>
  <EntityType Name="Self" BaseType="Loop.Self"/>
</Schema>"#;

/// A derived type declared before its base type.
pub const FORWARD_BASE_XML: &str = r#"<Schema Namespace="NS" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <EntityType Name="Customer" BaseType="NS.Person"/>
  <EntityType Name="Person">
    <Key><PropertyRef Name="ID"/></Key>
    <Property Name="ID" Type="Edm.Int32" Nullable="false"/>
  </EntityType>
</Schema>"#;

/// A shared vocabulary-style schema used as a referenced model.
pub const COMMON_XML: &str = r#"<Schema Namespace="Common" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <EntityType Name="Entity" Abstract="true">
    <Key><PropertyRef Name="ID"/></Key>
    <Property Name="ID" Type="Edm.Guid" Nullable="false"/>
  </EntityType>
  <Term Name="Description" Type="Edm.String"/>
  <Action Name="Touch" IsBound="true">
    <Parameter Name="entity" Type="Common.Entity"/>
  </Action>
</Schema>"#;

/// A service built on top of [`COMMON_XML`].
pub const SERVICE_XML: &str = r#"<Schema Namespace="Service" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <EntityType Name="Document" BaseType="Common.Entity">
    <Property Name="Title" Type="Edm.String"/>
  </EntityType>
  <EntityContainer Name="Default">
    <EntitySet Name="Documents" EntityType="Service.Document"/>
  </EntityContainer>
  <Annotations Target="Service.Document/Title">
    <Annotation Term="Common.Description" String="Document title"/>
  </Annotations>
</Schema>"#;
